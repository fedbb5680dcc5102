//! keyscan CLI: find a keyword in file contents and in file/folder names under a directory.

use anyhow::Result;
use clap::Parser;
use keyscan::engine::arg_parser::Cli;
use keyscan::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
