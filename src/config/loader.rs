//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching config/quoteverse.toml.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::adapters::api_ninjas::{ApiNinjasConfig, API_KEY_PLACEHOLDER, DEFAULT_API_BASE_URL};
use crate::application::DEFAULT_UNSCOPED_BATCHES;

/// Environment variable consulted when the config file carries no key
pub const API_KEY_ENV: &str = "API_NINJAS_KEY";

/// Upper bound on concurrent batches per unscoped load
pub const MAX_UNSCOPED_BATCHES: usize = 10;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration structure matching config/quoteverse.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiSection,
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Quote provider section
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSection {
    /// API base URL (`/quotes` is appended)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key; prefer the API_NINJAS_KEY env var over committing it
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Concurrent batches merged by an unscoped load
    #[serde(default = "default_unscoped_batches")]
    pub unscoped_batches: usize,
}

/// Preference storage section
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSection {
    /// Directory holding likedQuotes.json and bookmarkedQuotes.json
    pub data_dir: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            data_dir: "~/.local/share/quoteverse".to_string(),
        }
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_unscoped_batches() -> usize {
    DEFAULT_UNSCOPED_BATCHES
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "base_url cannot be empty".to_string(),
            ));
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(format!(
                "timeout_secs must be > 0, got {}",
                self.api.timeout_secs
            )));
        }

        if self.api.unscoped_batches == 0 || self.api.unscoped_batches > MAX_UNSCOPED_BATCHES {
            return Err(ConfigError::ValidationError(format!(
                "unscoped_batches must be 1-{}, got {}",
                MAX_UNSCOPED_BATCHES, self.api.unscoped_batches
            )));
        }

        if self.storage.data_dir.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "data_dir cannot be empty".to_string(),
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging level must be one of {:?}, got '{}'",
                LOG_LEVELS, self.logging.level
            )));
        }

        Ok(())
    }
}

impl ApiSection {
    /// Get API key with environment variable fallback
    /// Checks API_NINJAS_KEY env var if config value is empty, None or the placeholder
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            let key = key.trim();
            if !key.is_empty() && key != API_KEY_PLACEHOLDER {
                return Some(key.to_string());
            }
        }
        std::env::var(API_KEY_ENV).ok()
    }
}

impl StorageSection {
    /// Data directory with `~` expanded
    pub fn data_dir_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.data_dir).to_string())
    }
}

// Conversion from Config to the API client configuration
impl From<&Config> for ApiNinjasConfig {
    fn from(config: &Config) -> Self {
        ApiNinjasConfig {
            api_base_url: config.api.base_url.clone(),
            api_key: config.api.get_api_key(),
            timeout: Duration::from_secs(config.api.timeout_secs),
        }
    }
}
