//! In-process wiring: store, change capture, writer and reader.

use crate::nquads;
use anyhow::{Context, Result};
use quadsearch_config::QuadsearchConfig;
use quadsearch_core::{
    MemoryQuadStore, Quad, QuadStore, QuerySnapshot, RankedResult, ScanSnapshot,
    SearchIndex, SnapshotProducer,
};
use quadsearch_index::{IndexWriter, MemorySearchIndex, PullStats, SearchReader};
use quadsearch_llm::create_provider;
use quadsearch_watch::{PatchingStore, Subscription};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Read and parse N-Quads files, in order.
pub async fn read_quads(paths: &[PathBuf]) -> Result<Vec<Quad>> {
    let mut quads = Vec::new();
    for path in paths {
        quads.extend(read_file(path).await?);
    }
    Ok(quads)
}

async fn read_file(path: &Path) -> Result<Vec<Quad>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let quads = nquads::parse_document(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    debug!("Parsed {} quads from {}", quads.len(), path.display());
    Ok(quads)
}

/// A store whose writes are mirrored into a search index.
pub struct Pipeline {
    store: Arc<PatchingStore<MemoryQuadStore>>,
    index: Arc<dyn SearchIndex>,
    writer: Arc<IndexWriter>,
    reader: SearchReader,
    _subscription: Subscription,
}

impl Pipeline {
    /// Build the pipeline described by `config`. Must run inside a Tokio runtime.
    pub fn new(config: &QuadsearchConfig) -> Result<Self> {
        let index: Arc<dyn SearchIndex> = Arc::new(MemorySearchIndex::from_config(&config.index));
        let embedder = create_provider(&config.embedding, config.index.dimensions)
            .context("Failed to create embedding provider")?;

        let writer = Arc::new(IndexWriter::from_config(
            Arc::clone(&index),
            Arc::clone(&embedder),
            &config.index,
        ));
        let reader = SearchReader::from_config(Arc::clone(&index), embedder, &config.index);

        let store = Arc::new(PatchingStore::new(
            MemoryQuadStore::new(),
            config.delivery.mode,
        ));
        let subscription = store
            .subscribe(writer.clone())
            .context("Failed to subscribe index writer")?;

        info!(
            mode = config.delivery.mode.as_str(),
            dimensions = index.dimensions(),
            "Pipeline ready"
        );

        Ok(Self {
            store,
            index,
            writer,
            reader,
            _subscription: subscription,
        })
    }

    /// The change-capturing store.
    pub fn store(&self) -> &Arc<PatchingStore<MemoryQuadStore>> {
        &self.store
    }

    /// The search index.
    pub fn index(&self) -> &Arc<dyn SearchIndex> {
        &self.index
    }

    /// Insert quads through change capture and wait until the index caught up.
    pub async fn insert(&self, quads: &[Quad]) -> Result<()> {
        self.store.insert_many(quads).await?;
        self.store.drain().await;
        Ok(())
    }

    /// Delete quads through change capture and wait until the index caught up.
    pub async fn delete(&self, quads: &[Quad]) -> Result<()> {
        self.store.delete_many(quads).await?;
        self.store.drain().await;
        Ok(())
    }

    /// Load N-Quads files through change capture.
    pub async fn load(&self, paths: &[PathBuf]) -> Result<usize> {
        let quads = read_quads(paths).await?;
        self.insert(&quads).await?;
        Ok(quads.len())
    }

    /// Load N-Quads files into the store without emitting patches.
    ///
    /// The index only sees these quads after [`Pipeline::rebuild`].
    pub async fn load_silently(&self, paths: &[PathBuf]) -> Result<usize> {
        let quads = read_quads(paths).await?;
        self.store.inner().insert_many(&quads).await?;
        Ok(quads.len())
    }

    /// Populate the index from a full snapshot of the store.
    pub async fn rebuild(&self) -> Result<PullStats> {
        let snapshot = ScanSnapshot::new(Arc::clone(&self.store));
        Ok(self.writer.pull(&snapshot).await?)
    }

    /// Hybrid search over the index.
    pub async fn search(&self, query: &str, limit: Option<usize>) -> Result<Vec<RankedResult>> {
        Ok(self.reader.search(query, limit).await?)
    }

    /// Snapshot producer over the store, by pattern scan.
    pub fn scan_snapshot(&self) -> impl SnapshotProducer {
        ScanSnapshot::new(Arc::clone(&self.store))
    }

    /// Snapshot producer over the store, by CONSTRUCT query.
    pub fn query_snapshot(&self) -> impl SnapshotProducer {
        QuerySnapshot::new(Arc::clone(&self.store))
    }
}
