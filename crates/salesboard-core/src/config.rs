//! Configuration types.
//!
//! Configuration lives in `config.toml` under the platform config directory
//! (`~/.config/salesboard/config.toml` on Linux). Every section is optional;
//! a missing file means defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::schema::CollectionKind;

/// Runtime configuration loaded from config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Chat assistant settings
    #[serde(default)]
    pub chat: ChatConfig,

    /// Query defaults
    #[serde(default)]
    pub query: QueryConfig,
}

/// Chat assistant configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Pause before the assistant's reply is appended, in milliseconds.
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,

    /// Fallback template; `{input}` is replaced with the user's text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,

    /// Ordered keyword rules. Empty keeps the built-in table.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

impl ChatConfig {
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: default_reply_delay_ms(),
            fallback: None,
            rules: Vec::new(),
        }
    }
}

fn default_reply_delay_ms() -> u64 {
    800
}

/// One configured response rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Any of these, as a substring of the lower-cased input, selects the rule.
    pub keywords: Vec<String>,

    /// Static response text.
    pub response: String,
}

/// Query defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Collection used when a command does not name one.
    #[serde(default)]
    pub default_kind: CollectionKind,

    /// Row limit for top-N listings.
    #[serde(default = "default_top_limit")]
    pub top_limit: usize,

    /// Products with stock at or below this are flagged.
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: f64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_kind: CollectionKind::default(),
            top_limit: default_top_limit(),
            low_stock_threshold: default_low_stock_threshold(),
        }
    }
}

fn default_top_limit() -> usize {
    5
}

fn default_low_stock_threshold() -> f64 {
    10.0
}

impl AppConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Load from the default location, falling back to defaults if absent.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path().ok_or(ConfigError::NoConfigDir)?;
        if !path.exists() {
            tracing::info!("No config.toml found at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }
}

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("salesboard"))
}

/// Get the path to config.toml.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}
