//! Application settings loaded from config.toml
//!
//! Every section is optional. A missing file is not an error either: the portal
//! runs on built-in defaults and logs that it did so.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`]
pub const CONFIG_PATH_ENV: &str = "COUNTY_PORTAL_CONFIG";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Site-wide display settings
    pub site: SiteConfig,
    /// Durable storage settings
    pub storage: StorageConfig,
    /// Chatbot timing
    pub chatbot: ChatbotConfig,
}

/// Site-wide display settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// County name shown in replies
    pub name: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Embu County".to_string(),
        }
    }
}

/// Durable storage settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Prefix prepended to every per-kind storage key
    pub key_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key_prefix: "embu_".to_string(),
        }
    }
}

impl StorageConfig {
    /// Builds the full storage key for a content kind (e.g. `embu_news`).
    #[must_use]
    pub fn key_for(&self, kind_key: &str) -> String {
        format!("{}{kind_key}", self.key_prefix)
    }
}

/// Chatbot "typing" delay settings
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ChatbotConfig {
    /// Fixed part of the reply delay in milliseconds
    pub typing_delay_ms: u64,
    /// Upper bound (exclusive) of the random extra delay in milliseconds
    pub typing_jitter_ms: u64,
}

impl Default for ChatbotConfig {
    fn default() -> Self {
        Self {
            typing_delay_ms: 800,
            typing_jitter_ms: 400,
        }
    }
}

impl ChatbotConfig {
    /// Fixed part of the delay
    #[must_use]
    pub const fn base_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }

    /// Upper bound of the random extra delay
    #[must_use]
    pub const fn jitter(&self) -> Duration {
        Duration::from_millis(self.typing_jitter_ms)
    }
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file {:?}: {e}", path.as_ref()),
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text
///
/// # Errors
/// Returns an error if the TOML is invalid.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the application configuration, honouring `COUNTY_PORTAL_CONFIG`.
///
/// A missing file falls back to defaults; a file that exists but does not
/// parse is an error.
pub fn load_app_config() -> Result<AppConfig> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    if !Path::new(&path).exists() {
        tracing::info!("No configuration file at {path}, using defaults");
        return Ok(AppConfig::default());
    }

    tracing::debug!("Loading configuration from {path}");
    load_config(&path)
}
