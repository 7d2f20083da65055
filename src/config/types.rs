// Configuration type definitions

use std::path::PathBuf;

use serde::Deserialize;

fn default_debounce_ms() -> u64 {
    300
}

fn default_username_min_len() -> usize {
    3
}

fn default_search_min_len() -> usize {
    2
}

fn default_simulated_latency_ms() -> u64 {
    500
}

fn default_username_latency_ms() -> u64 {
    800
}

fn default_dismiss_ms() -> u64 {
    3000
}

/// Debounced query pipeline configuration section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_username_min_len")]
    pub username_min_len: usize,
    #[serde(default = "default_search_min_len")]
    pub search_min_len: usize,
    /// Artificial delay added to file-backed lookups
    #[serde(default = "default_simulated_latency_ms")]
    pub simulated_latency_ms: u64,
    #[serde(default = "default_username_latency_ms")]
    pub username_latency_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            debounce_ms: default_debounce_ms(),
            username_min_len: default_username_min_len(),
            search_min_len: default_search_min_len(),
            simulated_latency_ms: default_simulated_latency_ms(),
            username_latency_ms: default_username_latency_ms(),
        }
    }
}

/// Toast configuration section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_dismiss_ms")]
    pub dismiss_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        NotificationConfig {
            dismiss_ms: default_dismiss_ms(),
        }
    }
}

/// Storage configuration section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Directory for the persistent key-value store
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub notification: NotificationConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.pipeline.debounce_ms, 300);
        assert_eq!(config.pipeline.username_min_len, 3);
        assert_eq!(config.pipeline.search_min_len, 2);
        assert_eq!(config.notification.dismiss_ms, 3000);
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    fn test_storage_data_dir_parses() {
        let config: Config = toml::from_str(
            r#"
[storage]
data_dir = "/tmp/crudlab"
"#,
        )
        .unwrap();
        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/tmp/crudlab")));
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let config: Result<Config, _> = toml::from_str(
            r#"
[pipeline]
debounce_ms = "fast"
"#,
        );
        assert!(config.is_err());
    }

    // Any debounce delay in the range used by the lab screens parses verbatim,
    // and fields left out of the section keep their defaults.
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_debounce_parsing_keeps_other_defaults(delay in 0u64..5_000) {
            let toml_content = format!("[pipeline]\ndebounce_ms = {}\n", delay);

            let config: Result<Config, _> = toml::from_str(&toml_content);
            prop_assert!(config.is_ok(), "Failed to parse debounce_ms = {}", delay);

            let config = config.unwrap();
            prop_assert_eq!(config.pipeline.debounce_ms, delay);
            prop_assert_eq!(config.pipeline.username_min_len, 3);
            prop_assert_eq!(config.pipeline.search_min_len, 2);
            prop_assert_eq!(config.notification.dismiss_ms, 3000);
        }
    }
}
