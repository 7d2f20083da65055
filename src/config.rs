//! Configuration loading
//!
//! Reads `~/.config/crudlab/config.toml`. A missing file yields defaults; an
//! unreadable or malformed file yields defaults plus a warning for the UI.

mod types;

use std::fs;
use std::path::{Path, PathBuf};

pub use types::{Config, NotificationConfig, PipelineConfig, StorageConfig};

const CONFIG_DIR: &str = "crudlab";
const CONFIG_FILE: &str = "config.toml";

/// Outcome of loading the configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigResult {
    pub config: Config,
    /// Set when the file existed but could not be used
    pub warning: Option<String>,
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join(CONFIG_DIR).join(CONFIG_FILE))
}

pub fn load_config() -> ConfigResult {
    match config_path() {
        Some(path) => load_config_from_path(&path),
        None => ConfigResult::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> ConfigResult {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return ConfigResult::default(),
        Err(e) => {
            log::warn!("Failed to read config {}: {}", path.display(), e);
            return ConfigResult {
                config: Config::default(),
                warning: Some(format!("Config unreadable, using defaults: {}", e)),
            };
        }
    };

    parse_config_toml(&contents)
}

pub fn parse_config_toml(contents: &str) -> ConfigResult {
    match toml::from_str::<Config>(contents) {
        Ok(config) => ConfigResult {
            config,
            warning: None,
        },
        Err(e) => {
            log::warn!("Invalid config: {}", e);
            ConfigResult {
                config: Config::default(),
                warning: Some(format!("Invalid config, using defaults: {}", e.message())),
            }
        }
    }
}

/// Directory for the persistent key-value store
///
/// Uses `[storage] data_dir` when set, otherwise the platform data directory.
pub fn data_dir(config: &Config) -> PathBuf {
    config
        .storage
        .data_dir
        .clone()
        .or_else(|| dirs::data_dir().map(|p| p.join(CONFIG_DIR)))
        .unwrap_or_else(|| PathBuf::from(".").join(CONFIG_DIR))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
