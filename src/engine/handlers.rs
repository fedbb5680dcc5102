//! CLI command handler: build the config (file settings, then flags), run the search, print the summary.

use anyhow::{Context, Result};
use log::debug;
use std::io;

use crate::engine::arg_parser::Cli;
use crate::report::{JsonSink, ReportSink, TextSink, print_summary, write_summary_json};
use crate::utils::{PackagePaths, apply_file_to_config, load_keyscan_toml, setup_logging};
use crate::{SearchConfig, SearchPhase, search};

const RULE: &str = "==================================";

/// Merge `.keyscan.toml` (from the search root) and CLI flags. Flags win. Returns (config, json).
pub fn setup_config(cli: &Cli) -> (SearchConfig, bool) {
    let mut config = SearchConfig::new(cli.path.clone(), cli.keyword.clone());
    let mut json = false;
    if let Some(file) = load_keyscan_toml(&cli.path) {
        apply_file_to_config(&file, &mut config);
        if let Some(j) = file.json() {
            json = j;
        }
    }
    if let Some(v) = cli.verbose {
        config.verbose = v;
    }
    if let Some(n) = cli.max_size {
        config.size_ceiling = n;
    }
    if let Some(n) = cli.threads {
        config.threads = Some(n);
    }
    if let Some(f) = cli.follow_links {
        config.follow_links = f;
    }
    if let Some(j) = cli.json {
        json = j;
    }
    (config, json)
}

/// Run one search and print its summary. Any error maps to a non-zero exit in `main`.
pub fn handle_run(cli: &Cli) -> Result<()> {
    setup_logging(cli.verbose.unwrap_or(false), cli.json.unwrap_or(false));
    let (config, json) = setup_config(cli);
    debug!("{} CONFIG:{:#?}", env!("CARGO_PKG_NAME").to_uppercase(), config);

    if !json {
        println!("{}", RULE);
        println!(
            "{}: search file contents and names.",
            PackagePaths::get().pkg_name()
        );
        println!("searching...");
        println!("{}", RULE);
    }

    let mut sink: Box<dyn ReportSink> = if json {
        Box::new(JsonSink::new(io::stdout()))
    } else {
        Box::new(TextSink::new(io::stdout(), config.keyword.clone()))
    };
    let summary = search(&config, sink.as_mut()).with_context(|| {
        format!(
            "search for {:?} in {}",
            config.keyword,
            config.root.display()
        )
    })?;
    drop(sink);

    let written = if json {
        write_summary_json(&mut io::stdout().lock(), &config, &summary)
    } else {
        println!("{}", RULE);
        log::info!("Search complete.");
        print_summary(&config, &summary)
    };
    written.context("write summary")?;
    debug!("search phase: {}", SearchPhase::Reported);
    Ok(())
}
