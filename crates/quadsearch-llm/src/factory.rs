//! Provider construction from configuration.

use crate::hashing::HashingEmbeddingProvider;
use crate::ollama::OllamaEmbeddingProvider;
use quadsearch_config::{EmbeddingConfig, EmbeddingProviderType};
use quadsearch_core::{EmbeddingProvider, EmbeddingResult};
use std::sync::Arc;
use tracing::info;

/// Create the configured embedding provider.
///
/// `index_dimensions` is used unless the embedding section pins its own
/// `dimensions`; configuration validation keeps the two in agreement.
pub fn create_provider(
    config: &EmbeddingConfig,
    index_dimensions: usize,
) -> EmbeddingResult<Arc<dyn EmbeddingProvider>> {
    let dimensions = config.dimensions.unwrap_or(index_dimensions);

    let provider: Arc<dyn EmbeddingProvider> = match config.provider {
        EmbeddingProviderType::Hashing => Arc::new(
            HashingEmbeddingProvider::new(dimensions)?.with_model_name(config.get_model()),
        ),
        EmbeddingProviderType::Ollama => {
            Arc::new(OllamaEmbeddingProvider::from_config(config, dimensions)?)
        }
    };

    info!(
        provider = config.provider.as_str(),
        model = provider.model_name(),
        dimensions,
        "Created embedding provider"
    );
    Ok(provider)
}
