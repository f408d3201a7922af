//! In-process hybrid search index.
//!
//! Lexical relevance is BM25 over the tokenised subject, predicate and object
//! of each document; semantic relevance is cosine similarity between the query
//! embedding and the stored embedding. Each component is divided by its best
//! score for the query and the two are blended by configured weights.
//!
//! All state sits behind one lock, and a commit holds the write half for its
//! whole batch, so searches see either none or all of a patch.

mod bm25;
mod vector;

pub use bm25::{compute_idf, compute_term_score, Bm25Params};
pub use vector::cosine_similarity;

use async_trait::async_trait;
use bm25::LexicalIndex;
use parking_lot::RwLock;
use quadsearch_config::IndexConfig;
use quadsearch_core::{
    tokenize, CommitStats, Document, HybridQuery, IndexBatch, IndexError, IndexResult,
    ScoredDocument, SearchIndex,
};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, trace};

/// How lexical and vector relevance combine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingConfig {
    /// Weight of the normalised BM25 score
    pub text_weight: f32,
    /// Weight of the normalised cosine similarity
    pub vector_weight: f32,
    /// Vector matches below this similarity are ignored
    pub similarity_threshold: f32,
    /// BM25 parameters
    pub bm25: Bm25Params,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self::from(&IndexConfig::default())
    }
}

impl From<&IndexConfig> for RankingConfig {
    fn from(config: &IndexConfig) -> Self {
        Self {
            text_weight: config.text_weight,
            vector_weight: config.vector_weight,
            similarity_threshold: config.similarity_threshold,
            bm25: Bm25Params {
                k1: f64::from(config.bm25_k1),
                b: f64::from(config.bm25_b),
            },
        }
    }
}

struct StoredDocument {
    document: Document,
    tokens: Vec<String>,
}

#[derive(Default)]
struct IndexState {
    documents: HashMap<String, StoredDocument>,
    lexical: LexicalIndex,
}

impl IndexState {
    fn remove(&mut self, id: &str) -> bool {
        match self.documents.remove(id) {
            Some(stored) => {
                self.lexical.remove(id, &stored.tokens);
                true
            }
            None => false,
        }
    }

    fn upsert(&mut self, document: Document) {
        self.remove(&document.id);

        let mut tokens = tokenize(&document.subject);
        tokens.extend(tokenize(&document.predicate));
        tokens.extend(tokenize(&document.object));

        self.lexical.insert(&document.id, &tokens);
        self.documents
            .insert(document.id.clone(), StoredDocument { document, tokens });
    }
}

/// Hybrid BM25 + vector index held in memory
pub struct MemorySearchIndex {
    dimensions: usize,
    ranking: RankingConfig,
    state: RwLock<IndexState>,
}

impl MemorySearchIndex {
    /// Create an empty index for `dimensions`-long embeddings.
    pub fn new(dimensions: usize, ranking: RankingConfig) -> Self {
        Self {
            dimensions,
            ranking,
            state: RwLock::new(IndexState::default()),
        }
    }

    /// Create an index from the `[index]` configuration section.
    pub fn from_config(config: &IndexConfig) -> Self {
        Self::new(config.dimensions, RankingConfig::from(config))
    }

    /// Ranking parameters in effect.
    pub fn ranking(&self) -> &RankingConfig {
        &self.ranking
    }

    fn check_dimensions(&self, embedding: &[f32]) -> IndexResult<()> {
        if embedding.len() != self.dimensions {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimensions,
                actual: embedding.len(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SearchIndex for MemorySearchIndex {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn commit(&self, batch: IndexBatch) -> IndexResult<CommitStats> {
        for document in &batch.upserts {
            self.check_dimensions(&document.embedding)?;
        }

        let mut state = self.state.write();
        let mut stats = CommitStats::default();

        for id in &batch.deletions {
            if state.remove(id) {
                stats.removed += 1;
            }
        }
        for document in batch.upserts {
            state.upsert(document);
            stats.upserted += 1;
        }

        debug!(
            removed = stats.removed,
            upserted = stats.upserted,
            total = state.documents.len(),
            "Committed index batch"
        );
        Ok(stats)
    }

    async fn search(&self, query: &HybridQuery) -> IndexResult<Vec<ScoredDocument>> {
        self.check_dimensions(&query.embedding)?;
        if query.limit == 0 {
            return Ok(Vec::new());
        }

        let state = self.state.read();
        let ranking = &self.ranking;

        let text_scores = state
            .lexical
            .score(&tokenize(&query.text), &ranking.bm25);
        let max_text = text_scores.values().copied().fold(0.0f64, f64::max);

        let mut vector_scores = HashMap::new();
        for (id, stored) in &state.documents {
            let similarity = cosine_similarity(&query.embedding, &stored.document.embedding);
            if similarity > 0.0 && similarity >= ranking.similarity_threshold {
                vector_scores.insert(id.as_str(), similarity);
            }
        }
        let max_vector = vector_scores.values().copied().fold(0.0f32, f32::max);

        let mut hits: Vec<ScoredDocument> = state
            .documents
            .iter()
            .filter_map(|(id, stored)| {
                let text = match text_scores.get(id) {
                    Some(score) if max_text > 0.0 => (score / max_text) as f32,
                    _ => 0.0,
                };
                let vector = match vector_scores.get(id.as_str()) {
                    Some(score) if max_vector > 0.0 => score / max_vector,
                    _ => 0.0,
                };

                let score = ranking.text_weight * text + ranking.vector_weight * vector;
                (score > 0.0).then(|| ScoredDocument {
                    document: stored.document.clone(),
                    score,
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.document.id.cmp(&b.document.id))
        });
        hits.truncate(query.limit);

        trace!(
            query = %query.text,
            lexical = text_scores.len(),
            vector = vector_scores.len(),
            returned = hits.len(),
            "Hybrid search"
        );
        Ok(hits)
    }

    async fn get(&self, id: &str) -> IndexResult<Option<Document>> {
        Ok(self
            .state
            .read()
            .documents
            .get(id)
            .map(|stored| stored.document.clone()))
    }

    async fn len(&self) -> IndexResult<usize> {
        Ok(self.state.read().documents.len())
    }

    async fn clear(&self) -> IndexResult<()> {
        let mut state = self.state.write();
        state.documents.clear();
        state.lexical.clear();
        debug!("Cleared index");
        Ok(())
    }
}
