//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::datasource::BrokerConfig;
use crate::target::EditorDefaults;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub broker: BrokerConfig,

    #[serde(default)]
    pub editor: EditorDefaults,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("druidq").join("config.toml")),
            Some(PathBuf::from("./druidq.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Broker overrides
        if let Some(url) = var("DRUIDQ_BROKER_URL") {
            self.broker.url = url;
        }
        if let Some(timeout) = var("DRUIDQ_TIMEOUT_MS") {
            match timeout.parse() {
                Ok(ms) => self.broker.request_timeout_ms = ms,
                Err(_) => tracing::warn!(value = %timeout, "ignoring invalid DRUIDQ_TIMEOUT_MS"),
            }
        }

        // Logging overrides
        if let Some(level) = var("DRUIDQ_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("DRUIDQ_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# druidq Configuration
#
# Environment variables override these settings:
# - DRUIDQ_BROKER_URL
# - DRUIDQ_TIMEOUT_MS
# - DRUIDQ_LOG_LEVEL
# - DRUIDQ_LOG_FORMAT

[broker]
# Druid broker URL
url = "http://localhost:8082"

# Request timeout (ms)
request_timeout_ms = 10000

# Share datasource and column lookups between typeahead requests
cache_lookups = true

[editor]
# Query type for new targets: timeseries, groupBy, topN or scan
query_type = "groupBy"

# Granularity used when overriding
custom_granularity = "hour"

# Seeded into targets that leave them unset
limit = 0
threshold = 10
max_string_bytes = 1024

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
