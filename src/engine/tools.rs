//! Path and metadata utilities

use std::fs::{FileType, Metadata};
use std::path::Path;

/// Base name of `path`, lossily converted. Falls back to the whole path (e.g. `/`).
pub fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Modification time in nanoseconds since epoch; 0 when unavailable or before the epoch.
pub fn mtime_ns(meta: &Metadata) -> i64 {
    meta.modified()
        .ok()
        .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
        .map(|d| d.as_nanos() as i64)
        .unwrap_or(0)
}

/// FIFOs, sockets and device nodes. Opening or reading them can block or never reach EOF.
#[cfg(unix)]
pub fn is_special_file(ft: &FileType) -> bool {
    use std::os::unix::fs::FileTypeExt;
    ft.is_fifo() || ft.is_socket() || ft.is_char_device() || ft.is_block_device()
}

#[cfg(not(unix))]
pub fn is_special_file(_ft: &FileType) -> bool {
    false
}
