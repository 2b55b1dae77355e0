//! Application configuration value object

use serde::{Deserialize, Serialize};

/// Default listen address
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub hf_api_token: Option<String>,
    pub replicate_api_token: Option<String>,
    pub lyrics_model: Option<String>,
    pub lyrics_api_url: Option<String>,
    pub synthesis_version: Option<String>,
    pub synthesis_api_url: Option<String>,
    pub bind: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            hf_api_token: None,
            replicate_api_token: None,
            lyrics_model: None,
            lyrics_api_url: None,
            synthesis_version: None,
            synthesis_api_url: None,
            bind: Some(DEFAULT_BIND.to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            hf_api_token: other.hf_api_token.or(self.hf_api_token),
            replicate_api_token: other.replicate_api_token.or(self.replicate_api_token),
            lyrics_model: other.lyrics_model.or(self.lyrics_model),
            lyrics_api_url: other.lyrics_api_url.or(self.lyrics_api_url),
            synthesis_version: other.synthesis_version.or(self.synthesis_version),
            synthesis_api_url: other.synthesis_api_url.or(self.synthesis_api_url),
            bind: other.bind.or(self.bind),
        }
    }

    /// Get the listen address, or the default if not set
    pub fn bind_or_default(&self) -> &str {
        self.bind.as_deref().unwrap_or(DEFAULT_BIND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert!(config.hf_api_token.is_none());
        assert!(config.replicate_api_token.is_none());
        assert!(config.lyrics_model.is_none());
        assert_eq!(config.bind, Some(DEFAULT_BIND.to_string()));
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.hf_api_token.is_none());
        assert!(config.replicate_api_token.is_none());
        assert!(config.lyrics_model.is_none());
        assert!(config.lyrics_api_url.is_none());
        assert!(config.synthesis_version.is_none());
        assert!(config.synthesis_api_url.is_none());
        assert!(config.bind.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            replicate_api_token: Some("base_token".to_string()),
            bind: Some("127.0.0.1:9000".to_string()),
            lyrics_model: Some("base-model".to_string()),
            ..Default::default()
        };

        let other = AppConfig {
            replicate_api_token: Some("other_token".to_string()),
            bind: None, // Should not override
            lyrics_model: Some("other-model".to_string()),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.replicate_api_token, Some("other_token".to_string()));
        assert_eq!(merged.bind, Some("127.0.0.1:9000".to_string())); // Kept from base
        assert_eq!(merged.lyrics_model, Some("other-model".to_string()));
    }

    #[test]
    fn merge_preserves_base_when_other_is_none() {
        let base = AppConfig {
            hf_api_token: Some("token".to_string()),
            synthesis_version: Some("abc123".to_string()),
            ..Default::default()
        };

        let merged = base.merge(AppConfig::empty());

        assert_eq!(merged.hf_api_token, Some("token".to_string()));
        assert_eq!(merged.synthesis_version, Some("abc123".to_string()));
    }

    #[test]
    fn bind_or_default_falls_back() {
        assert_eq!(AppConfig::empty().bind_or_default(), DEFAULT_BIND);

        let config = AppConfig {
            bind: Some("0.0.0.0:3000".to_string()),
            ..Default::default()
        };
        assert_eq!(config.bind_or_default(), "0.0.0.0:3000");
    }
}
