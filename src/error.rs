//! Error type for the search engine. Per-file soft errors never become a [`SearchError`];
//! they travel on the result bus as [`SearchEvent::Unreadable`](crate::SearchEvent::Unreadable).

use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a search before or during the walk.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Path provided does not exist: {}", .0.display())]
    RootNotFound(PathBuf),
    #[error("Cannot access path {}: {source}", .path.display())]
    RootInaccessible {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Traversal failed: {0}")]
    Traversal(String),
    #[error("{0} thread panicked")]
    ThreadPanicked(&'static str),
}

impl SearchError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn traversal(msg: impl Into<String>) -> Self {
        Self::Traversal(msg.into())
    }

    /// True for errors raised before any work started (bad input, missing root).
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::RootNotFound(_) | Self::RootInaccessible { .. }
        )
    }
}
