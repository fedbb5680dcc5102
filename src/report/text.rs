use colored::Colorize;
use std::io::Write;
use std::path::Path;

use crate::MatchResult;

use super::ReportSink;

/// Plain, human-readable lines.
pub struct TextSink<W: Write> {
    out: W,
    keyword: String,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W, keyword: impl Into<String>) -> Self {
        Self {
            out,
            keyword: keyword.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for TextSink<W> {
    fn report_match(&mut self, result: &MatchResult, verbose: bool) {
        let path = result.path.display();
        if result.matched {
            let kind = if result.is_dir { "folder" } else { "file" };
            let _ = writeln!(
                self.out,
                "{} {} contains {}",
                path.to_string().green(),
                kind,
                self.keyword
            );
        } else if verbose {
            let _ = writeln!(self.out, "{} does NOT contain {}", path, self.keyword);
        }
    }

    fn report_skipped_too_large(&mut self, path: &Path, size: u64) {
        let _ = writeln!(
            self.out,
            "{} skipped. File too large ({} bytes).",
            path.display().to_string().yellow(),
            size
        );
    }

    fn report_unreadable(&mut self, path: &Path, reason: &str) {
        let _ = writeln!(
            self.out,
            "{} FILE cannot be read: {}",
            path.display().to_string().red(),
            reason
        );
    }
}
