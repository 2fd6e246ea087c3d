//! Settings layering: defaults, config files, environment.
//!
//! Files are read in order, global first, and merged key by key so a
//! project-local file only needs the settings it changes. Missing files are
//! silently ignored; malformed ones are reported and skipped.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use toml::{Table, Value};

use convert_core::options::ConversionOptions;

pub const LOCAL_CONFIG_FILE: &str = ".dcv.toml";

/// `~/.config/dcv/config.toml` (platform equivalent), then `./.dcv.toml`.
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("dcv").join("config.toml"));
    }
    paths.push(PathBuf::from(LOCAL_CONFIG_FILE));
    paths
}

/// Effective file settings plus what happened while reading them.
///
/// Loading runs before logging is set up (the files may raise verbosity),
/// so the notes are returned for the caller to log.
#[derive(Debug, Default)]
pub struct LoadedConfig {
    pub options: ConversionOptions,
    pub loaded: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

impl LoadedConfig {
    pub fn log(&self) {
        for path in &self.loaded {
            log::debug!("Loaded config {}", path.display());
        }
        for warning in &self.warnings {
            log::warn!("{}", warning);
        }
    }
}

pub fn load_config() -> LoadedConfig {
    load_config_from(&config_paths())
}

pub fn load_config_from(paths: &[PathBuf]) -> LoadedConfig {
    let mut result = LoadedConfig::default();
    let mut merged = Table::new();
    for path in paths {
        match read_table(path) {
            Ok(Some(table)) => {
                result.loaded.push(path.clone());
                merge_tables(&mut merged, table);
            }
            Ok(None) => {}
            Err(warning) => result.warnings.push(warning),
        }
    }

    match ConversionOptions::deserialize(Value::Table(merged)) {
        Ok(opts) => result.options = opts,
        Err(e) => result.warnings.push(format!("Ignoring config files: {}", e)),
    }
    result
}

/// `Ok(None)` when the file does not exist or cannot be read.
fn read_table(path: &Path) -> Result<Option<Table>, String> {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return Ok(None);
    };
    contents
        .parse::<Table>()
        .map(Some)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

/// Overlay `from` onto `base`. Nested tables merge, everything else replaces.
fn merge_tables(base: &mut Table, from: Table) {
    for (key, value) in from {
        match value {
            Value::Table(incoming) => match base.get_mut(&key) {
                Some(Value::Table(existing)) => merge_tables(existing, incoming),
                _ => {
                    base.insert(key, Value::Table(incoming));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}

/// Apply `DCV_APP_NAME`, `DCV_OUTPUT_DIR` and `DCV_BROWSER`.
pub fn apply_env_overrides(opts: &mut ConversionOptions, lookup: impl Fn(&str) -> Option<String>) {
    let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(name) = var("DCV_APP_NAME") {
        opts.app_name = name;
    }
    if let Some(dir) = var("DCV_OUTPUT_DIR") {
        opts.output_dir = PathBuf::from(dir);
    }
    if let Some(browser) = var("DCV_BROWSER") {
        opts.browser = Some(PathBuf::from(browser));
    }
}
