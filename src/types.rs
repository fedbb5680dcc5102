//! Public and internal types for the keyscan API and pipeline.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::error::SearchError;
use crate::utils::config::DEFAULT_SIZE_CEILING;

/// Which pipeline produced a [`MatchResult`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Name,
    Content,
}

/// One fact about a single visited entry. Dirs have size 0.
#[derive(Clone, Debug, Serialize)]
pub struct MatchResult {
    pub path: PathBuf,
    /// Base name of the entry.
    pub name: String,
    pub is_dir: bool,
    pub matched: bool,
    pub kind: MatchKind,
    pub size: u64,
    /// Modification time in nanoseconds since epoch (0 when unavailable).
    pub mtime_ns: i64,
}

/// What the walker knows about an entry when it dispatches work for it.
/// Shared (via `Arc`) by the name and content tasks of the same entry.
#[derive(Debug)]
pub struct EntryInfo {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
    pub size: u64,
    pub mtime_ns: i64,
    /// FIFO, socket or device node. Name-matched only.
    pub is_special: bool,
    match_claimed: AtomicBool,
}

impl EntryInfo {
    pub fn new(path: PathBuf, name: String, is_dir: bool, size: u64, mtime_ns: i64) -> Self {
        Self {
            path,
            name,
            is_dir,
            size,
            mtime_ns,
            is_special: false,
            match_claimed: AtomicBool::new(false),
        }
    }

    pub fn with_special(mut self, is_special: bool) -> Self {
        self.is_special = is_special;
        self
    }

    /// Returns true only for the first caller. An entry counts as matched once,
    /// even when both its name and its content contain the keyword.
    pub fn claim_match(&self) -> bool {
        !self.match_claimed.swap(true, Ordering::AcqRel)
    }

    /// Build the result for this entry.
    pub fn to_result(&self, kind: MatchKind, matched: bool) -> MatchResult {
        MatchResult {
            path: self.path.clone(),
            name: self.name.clone(),
            is_dir: self.is_dir,
            matched,
            kind,
            size: self.size,
            mtime_ns: self.mtime_ns,
        }
    }
}

/// Everything that travels on the result bus from producers to the consumer.
#[derive(Clone, Debug)]
pub enum SearchEvent {
    Match(MatchResult),
    SkippedTooLarge { path: PathBuf, size: u64 },
    Unreadable { path: PathBuf, reason: String },
}

/// Final statistics of one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchCounters {
    pub files_visited: u64,
    pub folders_visited: u64,
    pub files_matched: u64,
    pub folders_matched: u64,
}

/// Counters plus wall-clock duration, handed to the summary printer.
#[derive(Clone, Copy, Debug)]
pub struct SearchSummary {
    pub counters: SearchCounters,
    pub elapsed: Duration,
}

/// Lifecycle of a single search. No state is revisited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Walking,
    Draining,
    Finalized,
    Reported,
    Failed,
}

impl fmt::Display for SearchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SearchPhase::Idle => "idle",
            SearchPhase::Walking => "walking",
            SearchPhase::Draining => "draining",
            SearchPhase::Finalized => "finalized",
            SearchPhase::Reported => "reported",
            SearchPhase::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Immutable input of a search. Set once before the walk starts.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Directory to search.
    pub root: PathBuf,
    /// Case-sensitive substring to look for. Must be non-empty.
    pub keyword: String,
    /// Report non-matching entries, size skips and unreadable files.
    pub verbose: bool,
    /// Files of this size or larger are name-matched only (bytes).
    pub size_ceiling: u64,
    /// Override worker thread count. When None, derived from available parallelism and FD limit.
    pub threads: Option<usize>,
    /// Follow symbolic links during the walk.
    pub follow_links: bool,
}

impl SearchConfig {
    pub fn new(root: impl Into<PathBuf>, keyword: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            keyword: keyword.into(),
            verbose: false,
            size_ceiling: DEFAULT_SIZE_CEILING,
            threads: None,
            follow_links: false,
        }
    }

    /// Reject missing required inputs. Root existence is checked separately by the probe.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.root.as_os_str().is_empty() {
            return Err(SearchError::config("Missing path to directory"));
        }
        if self.keyword.is_empty() {
            return Err(SearchError::config("Missing keyword to search"));
        }
        if self.threads == Some(0) {
            return Err(SearchError::config("Thread count must be at least 1"));
        }
        Ok(())
    }
}
