use crate::errors::{MarsError, MarsResult};
use crate::types::DEFAULT_SNIPPET_LENGTH;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Backend address used when nothing else is configured
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";

/// Directory name under `~/.config`
pub const APP_NAME: &str = "mars-analyzer";

/// Client configuration, every field optional so files can be partial
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct MarsConfig {
    pub backend_url: Option<String>,
    pub log_level: Option<String>,
    pub snippet_length: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub render_markdown: Option<bool>,
}

impl MarsConfig {
    /// Loads configuration from a file if it exists, otherwise returns the default config
    pub fn load_from_file(path: &Path) -> MarsResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| MarsError::ConfigError(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| MarsError::ConfigError(format!("Failed to parse config file: {}", e)))
    }

    /// Merges this config with another config, preferring values from the other config if present
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            backend_url: other
                .backend_url
                .clone()
                .or_else(|| self.backend_url.clone()),
            log_level: other.log_level.clone().or_else(|| self.log_level.clone()),
            snippet_length: other.snippet_length.or(self.snippet_length),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
            render_markdown: other.render_markdown.or(self.render_markdown),
        }
    }

    /// Base address with any trailing slash removed
    pub fn backend_url(&self) -> &str {
        self.backend_url
            .as_deref()
            .unwrap_or(DEFAULT_BACKEND_URL)
            .trim_end_matches('/')
    }

    pub fn snippet_length(&self) -> usize {
        self.snippet_length.unwrap_or(DEFAULT_SNIPPET_LENGTH)
    }

    /// `None` leaves requests bounded only by the transport
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn render_markdown(&self) -> bool {
        self.render_markdown.unwrap_or(false)
    }
}

/// Helper function to get default config directory
pub fn get_default_config_dir() -> MarsResult<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        MarsError::ConfigError("Could not determine home directory".to_string())
    })?;

    Ok(home_dir.join(".config").join(APP_NAME))
}

/// Helper function to get default config file path
pub fn get_default_config_file() -> MarsResult<PathBuf> {
    Ok(get_default_config_dir()?.join("config.toml"))
}
