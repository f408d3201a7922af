//! # Quadsearch Configuration Library
//!
//! Typed configuration for the quad-store to search-index synchronization stack.
//! Every section has sensible defaults, so an empty file (or no file at all)
//! yields a working in-process setup with the offline hashing embedder.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use quadsearch_config::ConfigLoader;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigLoader::load_from_file("quadsearch.toml").await?;
//!     println!("indexing {} dimensions", config.index.dimensions);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod components;
mod error;
mod loader;

pub use components::*;
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

use serde::{Deserialize, Serialize};

/// Root configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadsearchConfig {
    /// Search index settings (dimensions, ranking weights, pull batching)
    pub index: IndexConfig,
    /// Embedding provider selection
    pub embedding: EmbeddingConfig,
    /// Patch delivery mode for change capture
    pub delivery: DeliveryConfig,
    /// Log level for binaries
    pub logging: LoggingConfig,
}

impl QuadsearchConfig {
    /// Validate cross-section invariants.
    ///
    /// The embedding provider must produce vectors of exactly the index's
    /// fixed dimensionality, so the two sections are checked together.
    pub fn validate(&self) -> ConfigResult<()> {
        self.index.validate()?;
        self.embedding.validate()?;

        if let Some(dimensions) = self.embedding.dimensions {
            if dimensions != self.index.dimensions {
                return Err(ConfigError::invalid(
                    "embedding.dimensions",
                    format!(
                        "{} does not match index.dimensions {}",
                        dimensions, self.index.dimensions
                    ),
                ));
            }
        }

        Ok(())
    }

    /// Render the configuration back to TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = QuadsearchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.delivery.mode, DeliveryMode::Detached);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let mut config = QuadsearchConfig::default();
        config.embedding.dimensions = Some(config.index.dimensions + 1);

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("embedding.dimensions"));
    }

    #[test]
    fn test_toml_roundtrip_preserves_values() {
        let mut config = QuadsearchConfig::default();
        config.delivery.mode = DeliveryMode::Synchronous;
        config.index.default_limit = 3;

        let rendered = config.to_toml().unwrap();
        let parsed: QuadsearchConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
