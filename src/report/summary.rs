//! Final summary: banner-delimited text, or a single JSON record.

use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

use crate::{SearchConfig, SearchCounters, SearchSummary};

const RULE: &str = "==================================";

/// Write the human-readable summary to `out`.
pub fn write_summary<W: Write>(
    out: &mut W,
    config: &SearchConfig,
    summary: &SearchSummary,
) -> io::Result<()> {
    let c = &summary.counters;
    let kw = &config.keyword;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Done searching for {}", kw)?;
    writeln!(out, "Path: {}", config.root.display())?;
    writeln!(
        out,
        "Checked {} files in {} folders",
        c.files_visited, c.folders_visited
    )?;
    writeln!(out, "Found {} files containing {}", c.files_matched, kw)?;
    writeln!(out, "Found {} folders containing {}", c.folders_matched, kw)?;
    writeln!(out, "Elapsed: {:?}", summary.elapsed)?;
    writeln!(out, "{}", RULE)
}

/// Print the human-readable summary to stdout.
pub fn print_summary(config: &SearchConfig, summary: &SearchSummary) -> io::Result<()> {
    write_summary(&mut io::stdout().lock(), config, summary)
}

#[derive(Serialize)]
struct JsonSummary<'a> {
    event: &'static str,
    keyword: &'a str,
    path: &'a Path,
    #[serde(flatten)]
    counters: &'a SearchCounters,
    elapsed_ms: u64,
}

/// Write the summary as one JSON line.
pub fn write_summary_json<W: Write>(
    out: &mut W,
    config: &SearchConfig,
    summary: &SearchSummary,
) -> io::Result<()> {
    let record = JsonSummary {
        event: "summary",
        keyword: &config.keyword,
        path: &config.root,
        counters: &summary.counters,
        elapsed_ms: summary.elapsed.as_millis() as u64,
    };
    let line = serde_json::to_string(&record).map_err(io::Error::other)?;
    writeln!(out, "{}", line)
}
