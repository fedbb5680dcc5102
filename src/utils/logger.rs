use colored::Colorize;
use env_logger::Builder;
use log::{Level, LevelFilter, Record};
use std::io::Write;

/// Render one record as `{"level":..,"target":..,"msg":..}` for `--json` runs.
fn json_line(record: &Record<'_>) -> String {
    serde_json::json!({
        "event": "log",
        "level": record.level().as_str(),
        "target": record.target(),
        "msg": record.args().to_string(),
    })
    .to_string()
}

/// Colored `[keyscan LEVEL target] msg` lines for terminals.
fn text_line(record: &Record<'_>) -> String {
    let name = env!("CARGO_PKG_NAME");
    match record.level() {
        Level::Error | Level::Warn => {
            let level_str = match record.level() {
                Level::Warn => "WARN".yellow(),
                _ => "ERROR".red(),
            };
            let path = record.target().to_string().white();
            format!("[{} {} {}] {}", name.cyan(), level_str, path, record.args())
        }
        _ => format!("[{}] {}", name.cyan(), record.args()),
    }
}

/// Log to stderr. Dependencies log at WARN, this crate at INFO (DEBUG when `verbose`);
/// `RUST_LOG` still applies on top. `json` switches every record to one JSON object per line.
pub fn setup_logging(verbose: bool, json: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let _ = Builder::from_default_env()
        .filter_level(LevelFilter::Warn)
        .filter_module(env!("CARGO_PKG_NAME"), level)
        .format(move |buf, record| {
            let line = if json {
                json_line(record)
            } else {
                text_line(record)
            };
            writeln!(buf, "{}", line)
        })
        .try_init();
}
