//! Ollama embedding provider.

use async_trait::async_trait;
use quadsearch_config::EmbeddingConfig;
use quadsearch_core::{EmbeddingError, EmbeddingProvider, EmbeddingResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Request structure for the Ollama embedding API
#[derive(Debug, Serialize)]
struct OllamaEmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

/// Response structure from the Ollama embedding API
#[derive(Debug, Deserialize)]
struct OllamaEmbeddingResponse {
    embedding: Vec<f32>,
}

/// Ollama embedding provider
///
/// Connects to the Ollama API (local or remote) to generate embeddings.
/// Retries transport errors, timeouts, 429 and 5xx responses with
/// exponential backoff, and rejects vectors of the wrong length.
#[derive(Debug, Clone)]
pub struct OllamaEmbeddingProvider {
    client: Client,
    endpoint: String,
    model: String,
    dimensions: usize,
    timeout_secs: u64,
    max_retries: u32,
    retry_delay: Duration,
}

impl OllamaEmbeddingProvider {
    /// Create a provider for `endpoint` (without the `/api/...` path).
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        dimensions: usize,
        timeout_secs: u64,
        max_retries: u32,
    ) -> EmbeddingResult<Self> {
        if dimensions == 0 {
            return Err(EmbeddingError::ConfigError(
                "Ollama provider needs at least one dimension".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                EmbeddingError::ConfigError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            dimensions,
            timeout_secs,
            max_retries,
            retry_delay: DEFAULT_RETRY_DELAY,
        })
    }

    /// Create a provider from the embedding section of the configuration.
    pub fn from_config(config: &EmbeddingConfig, dimensions: usize) -> EmbeddingResult<Self> {
        let endpoint = config.get_api_url().ok_or_else(|| {
            EmbeddingError::ConfigError("Ollama provider requires an api_url".to_string())
        })?;

        Self::new(
            endpoint,
            config.get_model(),
            dimensions,
            config.timeout_secs,
            config.max_retries,
        )
    }

    /// Base delay before the first retry; doubled for each further attempt.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Make a single embedding request with retry logic and exponential backoff
    async fn embed_with_retry(&self, text: &str) -> EmbeddingResult<Vec<f32>> {
        let mut attempt = 0;

        loop {
            let err = match self.embed_single(text).await {
                Ok(embedding) => return self.validate_dimensions(embedding),
                Err(err) => err,
            };

            if !err.is_retryable() || attempt >= self.max_retries {
                return Err(err);
            }

            let delay = self.retry_delay * 2_u32.saturating_pow(attempt);
            tracing::warn!(
                "Embedding request failed (attempt {}/{}), retrying in {:?}: {}",
                attempt + 1,
                self.max_retries + 1,
                delay,
                err
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    /// Make a single embedding request without retry
    async fn embed_single(&self, text: &str) -> EmbeddingResult<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.endpoint);
        let request = OllamaEmbeddingRequest {
            model: &self.model,
            prompt: text,
        };

        tracing::debug!(
            "Sending embedding request to {} for {} chars",
            url,
            text.len()
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EmbeddingError::Timeout {
                        timeout_secs: self.timeout_secs,
                    }
                } else {
                    EmbeddingError::HttpError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(EmbeddingError::ProviderError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let parsed: OllamaEmbeddingResponse = response.json().await.map_err(|e| {
            EmbeddingError::InvalidResponse(format!("Failed to parse Ollama response: {}", e))
        })?;

        tracing::debug!(
            "Received embedding with {} dimensions",
            parsed.embedding.len()
        );
        Ok(parsed.embedding)
    }

    fn validate_dimensions(&self, embedding: Vec<f32>) -> EmbeddingResult<Vec<f32>> {
        if embedding.len() != self.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimensions,
                actual: embedding.len(),
            });
        }
        Ok(embedding)
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbeddingProvider {
    async fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>> {
        // Ollama rejects empty prompts; blank text carries no meaning anyway.
        if text.trim().is_empty() {
            return Ok(vec![0.0; self.dimensions]);
        }

        self.embed_with_retry(text).await
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadsearch_config::EmbeddingProviderType;

    #[test]
    fn test_from_config_uses_defaults() {
        let config = EmbeddingConfig {
            provider: EmbeddingProviderType::Ollama,
            ..Default::default()
        };

        let provider = OllamaEmbeddingProvider::from_config(&config, 768).unwrap();
        assert_eq!(provider.endpoint, "http://localhost:11434");
        assert_eq!(provider.model_name(), "nomic-embed-text");
        assert_eq!(provider.dimensions(), 768);
        assert_eq!(provider.max_retries, 3);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let provider =
            OllamaEmbeddingProvider::new("http://ollama:11434/", "m", 4, 5, 0).unwrap();
        assert_eq!(provider.endpoint, "http://ollama:11434");
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let result = OllamaEmbeddingProvider::new("http://localhost:11434", "m", 0, 5, 0);
        assert!(matches!(result, Err(EmbeddingError::ConfigError(_))));
    }
}
