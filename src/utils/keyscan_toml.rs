//! Load `.keyscan.toml` from the search root (CLI only). Lib callers build [`SearchConfig`] directly.

use serde::Deserialize;
use std::path::Path;

use crate::SearchConfig;
use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub struct KeyscanToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    verbose: Option<bool>,
    max_size: Option<u64>,
    threads: Option<usize>,
    follow_links: Option<bool>,
    json: Option<bool>,
}

impl KeyscanToml {
    /// Structured output requested by the file, if set.
    pub fn json(&self) -> Option<bool> {
        self.settings.json
    }
}

/// Load the settings file from `dir` if present. Returns None if missing, unreadable or malformed.
pub fn load_keyscan_toml(dir: &Path) -> Option<KeyscanToml> {
    let path = dir.join(PackagePaths::get().settings_filename());
    let s = std::fs::read_to_string(&path).ok()?;
    toml::from_str(&s)
        .map_err(|e| log::warn!("{}: {}", path.display(), e))
        .ok()
}

/// Overwrite config field from file when present.
macro_rules! apply_file_opt {
    ($sec:expr, $cfg:expr, $sec_field:ident => $cfg_field:ident) => {
        if let Some(v) = $sec.$sec_field {
            $cfg.$cfg_field = v;
        }
    };
}

/// Apply file settings to `config` (only fields present in the file). Call before applying CLI flags.
/// Path and keyword are never read from the file.
pub fn apply_file_to_config(file: &KeyscanToml, config: &mut SearchConfig) {
    let sec = &file.settings;
    apply_file_opt!(sec, config, verbose => verbose);
    apply_file_opt!(sec, config, max_size => size_ceiling);
    apply_file_opt!(sec, config, follow_links => follow_links);
    if let Some(n) = sec.threads {
        config.threads = Some(n);
    }
}
