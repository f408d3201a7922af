//! Change-capturing store decorator.

use crate::error::Result;
use crate::hub::{HubStats, PatchHub, Subscription};
use crate::listener::PatchListener;
use async_trait::async_trait;
use quadsearch_config::DeliveryMode;
use quadsearch_core::{
    Patch, Quad, QuadPattern, QuadStore, QuadStream, QueryableStore, StoreResult,
};
use std::sync::Arc;
use tracing::debug;

/// Wraps a [`QuadStore`] and emits one [`Patch`] per successful mutating call.
///
/// Reads pass straight through without touching listeners. A failed mutation
/// returns the wrapped store's error unchanged and emits nothing.
pub struct PatchingStore<S> {
    store: S,
    hub: PatchHub,
    mode: DeliveryMode,
}

impl<S: QuadStore> PatchingStore<S> {
    /// Wrap a store with its own, empty listener set.
    pub fn new(store: S, mode: DeliveryMode) -> Self {
        Self {
            store,
            hub: PatchHub::new(),
            mode,
        }
    }

    /// Register a listener for Patches produced from now on.
    pub fn subscribe(&self, listener: Arc<dyn PatchListener>) -> Result<Subscription> {
        self.hub.subscribe(listener)
    }

    /// Wait for every listener to finish the Patches emitted so far.
    pub async fn drain(&self) {
        self.hub.drain().await;
    }

    /// Delivery mode chosen at construction.
    pub fn mode(&self) -> DeliveryMode {
        self.mode
    }

    /// Delivery counters.
    pub fn stats(&self) -> HubStats {
        self.hub.stats()
    }

    /// The listener registry.
    pub fn hub(&self) -> &PatchHub {
        &self.hub
    }

    /// The wrapped store. Writes made through it bypass change capture.
    pub fn inner(&self) -> &S {
        &self.store
    }

    async fn emit(&self, patch: Patch) {
        debug!(
            insertions = patch.insertions.len(),
            deletions = patch.deletions.len(),
            "Captured store mutation"
        );
        self.hub.emit(patch, self.mode).await;
    }
}

#[async_trait]
impl<S: QuadStore> QuadStore for PatchingStore<S> {
    async fn insert_one(&self, quad: &Quad) -> StoreResult<()> {
        self.store.insert_one(quad).await?;
        self.emit(Patch::insert(vec![quad.clone()])).await;
        Ok(())
    }

    async fn insert_many(&self, quads: &[Quad]) -> StoreResult<()> {
        self.store.insert_many(quads).await?;
        self.emit(Patch::insert(quads.to_vec())).await;
        Ok(())
    }

    async fn delete_one(&self, quad: &Quad) -> StoreResult<()> {
        self.store.delete_one(quad).await?;
        self.emit(Patch::delete(vec![quad.clone()])).await;
        Ok(())
    }

    async fn delete_many(&self, quads: &[Quad]) -> StoreResult<()> {
        self.store.delete_many(quads).await?;
        self.emit(Patch::delete(quads.to_vec())).await;
        Ok(())
    }

    fn quads_matching(&self, pattern: QuadPattern) -> QuadStream<'_> {
        self.store.quads_matching(pattern)
    }

    async fn contains(&self, quad: &Quad) -> StoreResult<bool> {
        self.store.contains(quad).await
    }

    async fn len(&self) -> StoreResult<usize> {
        self.store.len().await
    }
}

impl<S: QuadStore + QueryableStore> QueryableStore for PatchingStore<S> {
    fn construct(&self, query: &str) -> QuadStream<'_> {
        self.store.construct(query)
    }
}
