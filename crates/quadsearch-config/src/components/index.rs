//! Search index configuration
//!
//! Controls the fixed embedding dimensionality of the index, how lexical and
//! vector relevance are blended at query time, and how bulk pulls are batched.

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// Index section of the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Embedding length N, fixed when the index is created
    pub dimensions: usize,
    /// Result count used when a search does not pass a limit
    pub default_limit: usize,
    /// Weight of the normalised BM25 score in the hybrid blend
    pub text_weight: f32,
    /// Weight of the normalised cosine similarity in the hybrid blend
    pub vector_weight: f32,
    /// Minimum cosine similarity for a document to count as a vector match
    pub similarity_threshold: f32,
    /// BM25 term-frequency saturation
    pub bm25_k1: f32,
    /// BM25 length normalisation
    pub bm25_b: f32,
    /// Quads per atomic batch during `pull()`
    pub pull_batch_size: usize,
    /// Embedding requests in flight per patch
    pub embedding_concurrency: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            dimensions: 256,
            default_limit: 10,
            text_weight: 0.5,
            vector_weight: 0.5,
            similarity_threshold: 0.8,
            bm25_k1: 1.2,
            bm25_b: 0.75,
            pull_batch_size: 64,
            embedding_concurrency: 4,
        }
    }
}

impl IndexConfig {
    /// Check ranges of every field.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.dimensions == 0 {
            return Err(ConfigError::invalid("index.dimensions", "must be > 0"));
        }
        if self.pull_batch_size == 0 {
            return Err(ConfigError::invalid("index.pull_batch_size", "must be > 0"));
        }
        if self.embedding_concurrency == 0 {
            return Err(ConfigError::invalid(
                "index.embedding_concurrency",
                "must be > 0",
            ));
        }
        if self.text_weight < 0.0 || self.vector_weight < 0.0 {
            return Err(ConfigError::invalid(
                "index.text_weight",
                "weights must be non-negative",
            ));
        }
        if self.text_weight + self.vector_weight <= 0.0 {
            return Err(ConfigError::invalid(
                "index.vector_weight",
                "text_weight + vector_weight must be positive",
            ));
        }
        if !(-1.0..=1.0).contains(&self.similarity_threshold) {
            return Err(ConfigError::invalid(
                "index.similarity_threshold",
                "must be within [-1, 1]",
            ));
        }
        if self.bm25_k1 < 0.0 || !(0.0..=1.0).contains(&self.bm25_b) {
            return Err(ConfigError::invalid(
                "index.bm25_b",
                "k1 must be >= 0 and b within [0, 1]",
            ));
        }
        Ok(())
    }
}
