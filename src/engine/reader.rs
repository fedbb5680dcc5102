//! Whole-file reads for the content pipeline. Failures here are soft: the entry gets no content result.

use log::trace;
use std::fs;
use std::io;
use std::path::Path;

use crate::engine::matcher::match_content;
use crate::pipeline::Counters;
use crate::{EntryInfo, SearchEvent};

/// Read the full contents of `path` into memory. The size ceiling is enforced by the walker.
pub fn read_file(path: &Path) -> io::Result<Vec<u8>> {
    fs::read(path)
}

/// Read `entry` and match its contents. Returns a match event, or an `Unreadable` event on I/O failure.
pub fn read_and_match(entry: &EntryInfo, keyword: &str, counters: &Counters) -> SearchEvent {
    match read_file(&entry.path) {
        Ok(content) => SearchEvent::Match(match_content(entry, &content, keyword, counters)),
        Err(e) => {
            trace!("{} cannot be read: {}", entry.path.display(), e);
            SearchEvent::Unreadable {
                path: entry.path.clone(),
                reason: e.to_string(),
            }
        }
    }
}
