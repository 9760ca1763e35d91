//! Application configuration.
//!
//! Groups the per-component configs so a host can load them from one JSON
//! file. Every field is optional; missing fields take the component defaults.
//!
//! ```json
//! {
//!   "matcher": { "fallbackKey": "hi" },
//!   "session": { "blurCloseDelayMs": 150 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::lookup::MatcherConfig;
use crate::search::SessionConfig;

/// Error types for configuration loading
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("Failed to load config: {0}")]
    LoadError(String),
    /// Config file is not valid JSON in the expected shape
    #[error("Failed to parse config: {0}")]
    ParseError(String),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Lexicon matcher settings
    pub matcher: MatcherConfig,
    /// Search session settings
    pub session: SessionConfig,
}

impl AppConfig {
    /// Parse configuration from JSON text
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load configuration from a file
    ///
    /// A missing file is not an error: defaults are used.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            crate::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
        let config = Self::from_json_str(&content)?;
        crate::info!("Loaded config from {:?}", path);
        Ok(config)
    }
}
