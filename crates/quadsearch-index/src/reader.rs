//! Ranked search over the index.

use quadsearch_config::IndexConfig;
use quadsearch_core::{EmbeddingProvider, HybridQuery, IndexResult, Iri, RankedResult, SearchIndex};
use std::sync::Arc;
use tracing::debug;

/// Answers text queries with the subjects of matching quads.
pub struct SearchReader {
    index: Arc<dyn SearchIndex>,
    embedder: Arc<dyn EmbeddingProvider>,
    default_limit: usize,
}

impl SearchReader {
    /// Create a reader returning up to 10 results by default.
    pub fn new(index: Arc<dyn SearchIndex>, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            index,
            embedder,
            default_limit: 10,
        }
    }

    /// Create a reader using the configured default limit.
    pub fn from_config(
        index: Arc<dyn SearchIndex>,
        embedder: Arc<dyn EmbeddingProvider>,
        config: &IndexConfig,
    ) -> Self {
        Self {
            default_limit: config.default_limit,
            ..Self::new(index, embedder)
        }
    }

    /// Hybrid search, best match first, at most `limit` (or the default) hits.
    ///
    /// Blank queries return nothing without touching the index or the
    /// embedding provider. Several hits may share a subject when more than
    /// one of its literals matched.
    pub async fn search(
        &self,
        query: &str,
        limit: Option<usize>,
    ) -> IndexResult<Vec<RankedResult>> {
        let limit = limit.unwrap_or(self.default_limit);
        if query.trim().is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let embedding = self.embedder.embed(query).await?;
        let hits = self
            .index
            .search(&HybridQuery {
                text: query.to_string(),
                embedding,
                limit,
            })
            .await?;

        debug!(query, hits = hits.len(), "Search complete");
        Ok(hits
            .into_iter()
            .map(|hit| RankedResult {
                score: hit.score,
                value: Iri::new(hit.document.subject),
            })
            .collect())
    }
}
