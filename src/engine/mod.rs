//! Engine module: matching, file reading, root probe, and the CLI front end

pub mod arg_parser;
pub mod handlers;
pub mod matcher;
pub mod probe;
pub mod reader;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use handlers::handle_run;
pub use matcher::{content_contains, match_content, match_name, name_contains};
pub use probe::probe_root;
pub use reader::{read_and_match, read_file};
pub use tools::{entry_name, is_special_file, mtime_ns};
