//! Reporting sinks. The engine only hands facts to a [`ReportSink`]; rendering lives here.

pub mod json;
pub mod summary;
pub mod text;

pub use json::JsonSink;
pub use summary::{print_summary, write_summary, write_summary_json};
pub use text::TextSink;

use std::path::Path;

use crate::MatchResult;

/// Receives every fact the consumer loop pulls off the result bus.
pub trait ReportSink {
    /// One name or content result. Non-matches are only worth rendering when `verbose`.
    fn report_match(&mut self, result: &MatchResult, verbose: bool);

    /// A file at or above the size ceiling was name-matched only.
    fn report_skipped_too_large(&mut self, path: &Path, size: u64);

    /// A file could not be read for content matching.
    fn report_unreadable(&mut self, path: &Path, reason: &str);
}
