//! Loading configuration from TOML files and strings.

use crate::{ConfigError, ConfigResult, QuadsearchConfig};
use std::path::Path;
use tracing::{debug, info};

/// Environment variable consulted by [`ConfigLoader::load_or_default`].
pub const CONFIG_PATH_ENV: &str = "QUADSEARCH_CONFIG";

/// Loads and validates [`QuadsearchConfig`] documents.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> ConfigResult<QuadsearchConfig> {
        let config: QuadsearchConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub async fn load_from_file(path: impl AsRef<Path>) -> ConfigResult<QuadsearchConfig> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config = Self::from_toml_str(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from an explicit path, then `$QUADSEARCH_CONFIG`, else defaults.
    pub async fn load_or_default(path: Option<&Path>) -> ConfigResult<QuadsearchConfig> {
        if let Some(path) = path {
            return Self::load_from_file(path).await;
        }

        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(env_path) => Self::load_from_file(Path::new(&env_path)).await,
            None => {
                debug!("No configuration file given, using defaults");
                Ok(QuadsearchConfig::default())
            }
        }
    }
}
