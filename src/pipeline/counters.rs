//! Shared search statistics. The only mutable state besides the result bus.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::SearchCounters;

/// Four monotonically increasing counters, all mutations serialized through one lock.
/// Read with [`Counters::snapshot`] once the completion signal has fired.
#[derive(Debug, Default)]
pub struct Counters {
    inner: Mutex<SearchCounters>,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SearchCounters> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Count a visited entry of the given kind.
    pub fn record_visit(&self, is_dir: bool) {
        let mut c = self.lock();
        if is_dir {
            c.folders_visited += 1;
        } else {
            c.files_visited += 1;
        }
    }

    /// Count a matched entry of the given kind.
    pub fn record_match(&self, is_dir: bool) {
        let mut c = self.lock();
        if is_dir {
            c.folders_matched += 1;
        } else {
            c.files_matched += 1;
        }
    }

    pub fn snapshot(&self) -> SearchCounters {
        *self.lock()
    }
}
