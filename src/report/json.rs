use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::MatchResult;

use super::ReportSink;

/// One JSON object per line, tagged by `"event"`.
#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub(crate) enum JsonRecord<'a> {
    Match(&'a MatchResult),
    SkippedTooLarge { path: &'a Path, size: u64 },
    Unreadable { path: &'a Path, reason: &'a str },
}

/// Structured sink for log pipelines and scripts.
pub struct JsonSink<W: Write> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, record: &JsonRecord<'_>) {
        match serde_json::to_string(record) {
            Ok(line) => {
                let _ = writeln!(self.out, "{}", line);
            }
            Err(e) => log::warn!("cannot serialize record: {}", e),
        }
    }
}

impl<W: Write> ReportSink for JsonSink<W> {
    fn report_match(&mut self, result: &MatchResult, verbose: bool) {
        if result.matched || verbose {
            self.emit(&JsonRecord::Match(result));
        }
    }

    fn report_skipped_too_large(&mut self, path: &Path, size: u64) {
        self.emit(&JsonRecord::SkippedTooLarge { path, size });
    }

    fn report_unreadable(&mut self, path: &Path, reason: &str) {
        self.emit(&JsonRecord::Unreadable { path, reason });
    }
}
