//! Patch application and bulk population.

use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use quadsearch_config::IndexConfig;
use quadsearch_core::{
    is_indexable, skolemize, CommitStats, Document, EmbeddingProvider, IndexBatch, IndexError,
    IndexResult, Patch, Quad, SearchIndex, SnapshotProducer,
};
use quadsearch_watch::PatchListener;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Totals from one [`IndexWriter::pull`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PullStats {
    /// Quads read from the snapshot
    pub quads: usize,
    /// Batches committed
    pub batches: usize,
    /// Documents inserted or replaced
    pub upserted: usize,
}

/// Applies Patches to a search index.
///
/// Only quads with string-literal objects are indexed; others are dropped
/// from both sides of a Patch before anything else happens. Every `apply` is
/// one index commit: embeddings are computed first, so a provider failure
/// leaves the index untouched.
pub struct IndexWriter {
    index: Arc<dyn SearchIndex>,
    embedder: Arc<dyn EmbeddingProvider>,
    concurrency: usize,
    batch_size: usize,
}

impl IndexWriter {
    /// Create a writer with one embedding request in flight and 64-quad pull
    /// batches.
    pub fn new(index: Arc<dyn SearchIndex>, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            index,
            embedder,
            concurrency: 1,
            batch_size: 64,
        }
    }

    /// Create a writer tuned by the `[index]` configuration section.
    pub fn from_config(
        index: Arc<dyn SearchIndex>,
        embedder: Arc<dyn EmbeddingProvider>,
        config: &IndexConfig,
    ) -> Self {
        Self::new(index, embedder)
            .with_concurrency(config.embedding_concurrency)
            .with_batch_size(config.pull_batch_size)
    }

    /// Maximum embedding requests in flight per `apply`.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Quads per commit during `pull`.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// The index being written.
    pub fn index(&self) -> &Arc<dyn SearchIndex> {
        &self.index
    }

    /// Apply one Patch: deletions first, then insertions, as a single commit.
    ///
    /// Deleting an id that is not indexed is a no-op. Inserting an indexed id
    /// replaces the document.
    pub async fn apply(&self, patch: &Patch) -> IndexResult<CommitStats> {
        let deletions = unique_ids(patch.deletions.iter());

        let mut seen = HashSet::new();
        let insertions: Vec<Quad> = patch
            .insertions
            .iter()
            .filter(|quad| is_indexable(quad) && seen.insert(skolemize(quad)))
            .cloned()
            .collect();

        let upserts = self.embed_documents(insertions).await?;
        let batch = IndexBatch { deletions, upserts };
        if batch.is_empty() {
            debug!("Patch has nothing to index");
            return Ok(CommitStats::default());
        }

        let stats = self.index.commit(batch).await?;
        debug!(
            removed = stats.removed,
            upserted = stats.upserted,
            "Applied patch"
        );
        Ok(stats)
    }

    /// Feed every quad from a snapshot through the insertion path.
    ///
    /// The index is not cleared first; existing documents are kept or
    /// replaced. Each batch commits on its own, so a failure part way leaves
    /// earlier batches in place.
    pub async fn pull(&self, source: &dyn SnapshotProducer) -> IndexResult<PullStats> {
        let mut stats = PullStats::default();
        let mut batches = source.snapshot().chunks(self.batch_size);

        while let Some(chunk) = batches.next().await {
            let quads = chunk.into_iter().collect::<Result<Vec<Quad>, _>>()?;
            stats.quads += quads.len();

            let committed = self.apply(&Patch::insert(quads)).await?;
            stats.batches += 1;
            stats.upserted += committed.upserted;
        }

        info!(
            quads = stats.quads,
            batches = stats.batches,
            upserted = stats.upserted,
            "Pulled snapshot into index"
        );
        Ok(stats)
    }

    async fn embed_documents(&self, quads: Vec<Quad>) -> IndexResult<Vec<Document>> {
        // Futures own their quad so the stream is Send for every lifetime.
        let pending: Vec<_> = quads
            .into_iter()
            .map(|quad| self.embed_document(quad))
            .collect();

        stream::iter(pending)
            .buffered(self.concurrency)
            .try_collect()
            .await
    }

    async fn embed_document(&self, quad: Quad) -> IndexResult<Document> {
        let expected = self.index.dimensions();
        let embedding = self.embedder.embed(quad.object.value()).await?;
        if embedding.len() != expected {
            return Err(IndexError::DimensionMismatch {
                expected,
                actual: embedding.len(),
            });
        }

        Ok(Document::from_quad(&quad, embedding))
    }
}

fn unique_ids<'a>(quads: impl Iterator<Item = &'a Quad>) -> Vec<String> {
    let mut seen = HashSet::new();
    quads
        .filter(|quad| is_indexable(quad))
        .map(skolemize)
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

#[async_trait]
impl PatchListener for IndexWriter {
    async fn on_patch(&self, patch: &Patch) -> anyhow::Result<()> {
        self.apply(patch).await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "index-writer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemorySearchIndex, RankingConfig};
    use quadsearch_core::{Literal, Term};
    use quadsearch_llm::HashingEmbeddingProvider;

    fn label(n: usize) -> Quad {
        Quad::new(
            Term::iri(format!("https://example.org/item/{}", n)),
            "https://example.org/label",
            Literal::plain(format!("item number {}", n)),
        )
    }

    #[tokio::test]
    async fn test_concurrent_embedding_runs_on_spawned_tasks() {
        let index = Arc::new(MemorySearchIndex::new(16, RankingConfig::default()));
        let embedder = Arc::new(HashingEmbeddingProvider::new(16).expect("embedder"));
        let writer = Arc::new(IndexWriter::new(index.clone(), embedder).with_concurrency(3));

        let direct = Arc::clone(&writer);
        let patch = Patch::insert((0..5).map(label).collect());
        let stats = tokio::spawn(async move { direct.apply(&patch).await })
            .await
            .expect("join")
            .expect("apply");
        assert_eq!(stats.upserted, 5);

        let listener: Arc<dyn PatchListener> = writer;
        let patch = Patch::delete(vec![label(0), label(1)]);
        tokio::spawn(async move { listener.on_patch(&patch).await })
            .await
            .expect("join")
            .expect("on_patch");

        assert_eq!(index.len().await.expect("len"), 3);
    }
}
