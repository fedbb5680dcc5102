use clap::Parser;
use std::path::PathBuf;

/// Search a directory tree for a keyword in file contents and in file/folder names.
#[derive(Clone, Parser)]
#[command(name = "keyscan")]
#[command(about = "Search file contents and names for a keyword.")]
pub struct Cli {
    /// Path to directory to search.
    #[arg(long, short = 'p', value_name = "PATH")]
    pub path: PathBuf,

    /// Keyword to search (case-sensitive substring).
    #[arg(long, short = 'k', value_name = "KEYWORD")]
    pub keyword: String,

    /// Verbose (prints all files searched, size skips and unreadable files).
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,

    /// Files of this size or larger (bytes) are matched by name only. Default: 100 MiB.
    #[arg(long, short = 's', value_name = "BYTES", value_parser = clap::value_parser!(u64))]
    pub max_size: Option<u64>,

    /// Matcher worker threads. Default: available parallelism, capped by the FD limit.
    #[arg(long, short = 't', value_parser = clap::value_parser!(usize))]
    pub threads: Option<usize>,

    /// Follow symbolic links.
    #[arg(long, short = 'f', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub follow_links: Option<bool>,

    /// Emit one JSON record per line instead of plain text.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub json: Option<bool>,
}
