//! In-flight task tracking (wait-group). The finalizer waits for the count to reach zero.

use std::sync::{Arc, Condvar, Mutex, PoisonError};

#[derive(Debug, Default)]
struct State {
    count: Mutex<usize>,
    idle: Condvar,
}

/// Counts outstanding work: the enumeration itself plus every queued or running task.
#[derive(Clone, Debug, Default)]
pub struct InFlight {
    state: Arc<State>,
}

/// Decrements the owning [`InFlight`] when dropped, whether the task succeeded, failed softly, or panicked.
#[derive(Debug)]
pub struct TaskGuard {
    state: Arc<State>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one unit of work. Call immediately before dispatching it.
    pub fn track(&self) -> TaskGuard {
        *self
            .state
            .count
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;
        TaskGuard {
            state: Arc::clone(&self.state),
        }
    }

    /// Current number of outstanding units.
    pub fn outstanding(&self) -> usize {
        *self
            .state
            .count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until every registered unit has finished.
    pub fn wait_idle(&self) {
        let count = self
            .state
            .count
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let _idle = self
            .state
            .idle
            .wait_while(count, |n| *n > 0)
            .unwrap_or_else(PoisonError::into_inner);
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        let mut count = self
            .state
            .count
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *count -= 1;
        if *count == 0 {
            self.state.idle.notify_all();
        }
    }
}
