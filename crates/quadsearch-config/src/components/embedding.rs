//! Simple embedding configuration with sensible defaults

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// Embedding provider type - enum for TOML serialization
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProviderType {
    /// Deterministic feature-hashing provider (default, offline)
    #[default]
    Hashing,
    /// Ollama provider (local or remote)
    Ollama,
}

impl EmbeddingProviderType {
    /// Get the type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hashing => "hashing",
            Self::Ollama => "ollama",
        }
    }
}

/// Embedding configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding provider type (hashing, ollama)
    pub provider: EmbeddingProviderType,
    /// Model name (defaults to a provider-appropriate model)
    pub model: Option<String>,
    /// Custom API endpoint (only for remote providers)
    pub api_url: Option<String>,
    /// Expected vector length; defaults to `index.dimensions`
    pub dimensions: Option<usize>,
    /// Per-request timeout for remote providers
    pub timeout_secs: u64,
    /// Retries after the first failed request
    pub max_retries: u32,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderType::Hashing,
            model: None,
            api_url: None,
            dimensions: None,
            timeout_secs: 30,
            max_retries: 3,
        }
    }
}

impl EmbeddingConfig {
    /// Get the actual model name to use
    pub fn get_model(&self) -> &str {
        self.model.as_deref().unwrap_or(match self.provider {
            EmbeddingProviderType::Hashing => "blake3-feature-hash",
            EmbeddingProviderType::Ollama => "nomic-embed-text",
        })
    }

    /// Get API URL for remote providers
    pub fn get_api_url(&self) -> Option<&str> {
        match self.provider {
            EmbeddingProviderType::Hashing => None,
            EmbeddingProviderType::Ollama => {
                self.api_url.as_deref().or(Some("http://localhost:11434"))
            }
        }
    }

    /// Check the section in isolation.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.dimensions == Some(0) {
            return Err(ConfigError::invalid("embedding.dimensions", "must be > 0"));
        }
        if self.provider == EmbeddingProviderType::Ollama && self.timeout_secs == 0 {
            return Err(ConfigError::invalid("embedding.timeout_secs", "must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_defaults() {
        let config = EmbeddingConfig::default();
        assert_eq!(config.get_model(), "blake3-feature-hash");
        assert_eq!(config.get_api_url(), None);

        let config = EmbeddingConfig {
            provider: EmbeddingProviderType::Ollama,
            ..Default::default()
        };
        assert_eq!(config.get_model(), "nomic-embed-text");
        assert_eq!(config.get_api_url(), Some("http://localhost:11434"));
    }

    #[test]
    fn test_explicit_model_wins() {
        let config: EmbeddingConfig =
            toml::from_str("provider = \"ollama\"\nmodel = \"mxbai-embed-large\"").unwrap();
        assert_eq!(config.get_model(), "mxbai-embed-large");
    }
}
