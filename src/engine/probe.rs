//! Root path probe: the search refuses to start on a path that does not exist.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::SearchError;

/// Check that `root` exists and return its canonical form.
pub fn probe_root(root: &Path) -> Result<PathBuf, SearchError> {
    match root.canonicalize() {
        Ok(path) => Ok(path),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(SearchError::RootNotFound(root.to_path_buf()))
        }
        Err(source) => Err(SearchError::RootInaccessible {
            path: root.to_path_buf(),
            source,
        }),
    }
}

