use crate::error::StoreResult;
use crate::model::{Quad, QuadPattern};
use async_trait::async_trait;
use futures::stream::BoxStream;
use std::sync::Arc;

/// Lazily produced quads, each possibly failing independently
pub type QuadStream<'a> = BoxStream<'a, StoreResult<Quad>>;

/// A mutable store of quads.
///
/// Writes are set semantics: inserting a present quad or deleting an absent
/// one succeeds without effect.
#[async_trait]
pub trait QuadStore: Send + Sync {
    /// Insert one quad
    async fn insert_one(&self, quad: &Quad) -> StoreResult<()>;

    /// Insert many quads as one operation
    async fn insert_many(&self, quads: &[Quad]) -> StoreResult<()>;

    /// Delete one quad
    async fn delete_one(&self, quad: &Quad) -> StoreResult<()>;

    /// Delete many quads as one operation
    async fn delete_many(&self, quads: &[Quad]) -> StoreResult<()>;

    /// Stream every quad matching the pattern
    fn quads_matching(&self, pattern: QuadPattern) -> QuadStream<'_>;

    /// Check if the quad is present
    async fn contains(&self, quad: &Quad) -> StoreResult<bool>;

    /// Number of stored quads
    async fn len(&self) -> StoreResult<usize>;

    /// Check if the store holds no quads
    async fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len().await? == 0)
    }
}

#[async_trait]
impl<S: QuadStore + ?Sized> QuadStore for Arc<S> {
    async fn insert_one(&self, quad: &Quad) -> StoreResult<()> {
        (**self).insert_one(quad).await
    }

    async fn insert_many(&self, quads: &[Quad]) -> StoreResult<()> {
        (**self).insert_many(quads).await
    }

    async fn delete_one(&self, quad: &Quad) -> StoreResult<()> {
        (**self).delete_one(quad).await
    }

    async fn delete_many(&self, quads: &[Quad]) -> StoreResult<()> {
        (**self).delete_many(quads).await
    }

    fn quads_matching(&self, pattern: QuadPattern) -> QuadStream<'_> {
        (**self).quads_matching(pattern)
    }

    async fn contains(&self, quad: &Quad) -> StoreResult<bool> {
        (**self).contains(quad).await
    }

    async fn len(&self) -> StoreResult<usize> {
        (**self).len().await
    }
}

/// A store that can evaluate quad-constructing queries.
pub trait QueryableStore: Send + Sync {
    /// Evaluate a CONSTRUCT-style query and stream the resulting quads, each
    /// in the graph its template placed it in
    fn construct(&self, query: &str) -> QuadStream<'_>;
}

impl<S: QueryableStore + ?Sized> QueryableStore for Arc<S> {
    fn construct(&self, query: &str) -> QuadStream<'_> {
        (**self).construct(query)
    }
}
