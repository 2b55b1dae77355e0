//! TOML config store adapter

use std::path::PathBuf;

use tokio::fs;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// TOML config store under the platform config directory
pub struct TomlConfigStore {
    path: PathBuf,
}

impl TomlConfigStore {
    /// Create a new config store with the default path
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("songforge");

        Self {
            path: config_dir.join("config.toml"),
        }
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the configuration file path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Check if the configuration file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load configuration from the file.
    ///
    /// A missing file is not an error; it loads as an empty config.
    pub async fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.exists() {
            return Ok(AppConfig::empty());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        Self::parse_toml(&content)
    }

    /// Parse TOML content into AppConfig
    fn parse_toml(content: &str) -> Result<AppConfig, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

impl Default for TomlConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Environment variable overlay.
///
/// Unset and empty variables leave the corresponding field unfilled so the
/// usual merge precedence applies.
pub fn env_config() -> AppConfig {
    AppConfig {
        hf_api_token: non_empty_var("HF_API_TOKEN"),
        replicate_api_token: non_empty_var("REPLICATE_API_TOKEN"),
        lyrics_model: non_empty_var("SONGFORGE_LYRICS_MODEL"),
        lyrics_api_url: non_empty_var("SONGFORGE_LYRICS_API_URL"),
        synthesis_version: non_empty_var("SONGFORGE_SYNTHESIS_VERSION"),
        synthesis_api_url: non_empty_var("SONGFORGE_SYNTHESIS_API_URL"),
        bind: non_empty_var("SONGFORGE_BIND"),
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
