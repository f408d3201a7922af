use anyhow::Result;
use futures::TryStreamExt;
use quadsearch_core::{MemoryQuadStore, QuadStore, QuerySnapshot, ScanSnapshot, SnapshotProducer};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::cli::SnapshotStrategy;
use crate::pipeline::read_quads;

/// Print the index-worthy quads of the given files as N-Quads
pub async fn execute(data: Vec<PathBuf>, strategy: SnapshotStrategy) -> Result<()> {
    let store = Arc::new(MemoryQuadStore::new());
    store.insert_many(&read_quads(&data).await?).await?;

    let producer: Box<dyn SnapshotProducer> = match strategy {
        SnapshotStrategy::Scan => Box::new(ScanSnapshot::new(Arc::clone(&store))),
        SnapshotStrategy::Query => Box::new(QuerySnapshot::new(Arc::clone(&store))),
    };

    let quads: Vec<_> = producer.snapshot().try_collect().await?;
    debug!("Snapshot produced {} quads", quads.len());

    for quad in quads {
        println!("{}", quad);
    }

    Ok(())
}
