//! In-process quad store.
//!
//! Backs tests and the CLI. Reads take a consistent copy of the matching quads
//! up front, so a stream never observes writes made after it was created.

use crate::error::{StoreError, StoreResult};
use crate::filter::is_indexable;
use crate::model::{Quad, QuadPattern};
use crate::snapshot::SNAPSHOT_QUERY;
use crate::traits::{QuadStore, QuadStream, QueryableStore};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use parking_lot::RwLock;
use std::collections::BTreeSet;
use tracing::trace;

/// Ordered, set-semantics quad store held in memory
#[derive(Debug, Default)]
pub struct MemoryQuadStore {
    quads: RwLock<BTreeSet<Quad>>,
}

impl MemoryQuadStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given quads
    pub fn with_quads(quads: impl IntoIterator<Item = Quad>) -> Self {
        Self {
            quads: RwLock::new(quads.into_iter().collect()),
        }
    }

    fn collect(&self, pattern: &QuadPattern) -> Vec<Quad> {
        self.quads
            .read()
            .iter()
            .filter(|quad| pattern.matches(quad))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl QuadStore for MemoryQuadStore {
    async fn insert_one(&self, quad: &Quad) -> StoreResult<()> {
        self.quads.write().insert(quad.clone());
        Ok(())
    }

    async fn insert_many(&self, quads: &[Quad]) -> StoreResult<()> {
        let mut guard = self.quads.write();
        guard.extend(quads.iter().cloned());
        trace!(count = quads.len(), total = guard.len(), "inserted quads");
        Ok(())
    }

    async fn delete_one(&self, quad: &Quad) -> StoreResult<()> {
        self.quads.write().remove(quad);
        Ok(())
    }

    async fn delete_many(&self, quads: &[Quad]) -> StoreResult<()> {
        let mut guard = self.quads.write();
        for quad in quads {
            guard.remove(quad);
        }
        trace!(count = quads.len(), total = guard.len(), "deleted quads");
        Ok(())
    }

    fn quads_matching(&self, pattern: QuadPattern) -> QuadStream<'_> {
        stream::iter(self.collect(&pattern).into_iter().map(Ok)).boxed()
    }

    async fn contains(&self, quad: &Quad) -> StoreResult<bool> {
        Ok(self.quads.read().contains(quad))
    }

    async fn len(&self) -> StoreResult<usize> {
        Ok(self.quads.read().len())
    }
}

/// Only [`SNAPSHOT_QUERY`] is understood; anything else is unsupported.
impl QueryableStore for MemoryQuadStore {
    fn construct(&self, query: &str) -> QuadStream<'_> {
        if query.trim() != SNAPSHOT_QUERY.trim() {
            let err = StoreError::unsupported("memory store only evaluates the snapshot query");
            return stream::once(async move { Err(err) }).boxed();
        }

        let quads: Vec<Quad> = self
            .quads
            .read()
            .iter()
            .filter(|quad| is_indexable(quad))
            .cloned()
            .collect();
        stream::iter(quads.into_iter().map(Ok)).boxed()
    }
}
