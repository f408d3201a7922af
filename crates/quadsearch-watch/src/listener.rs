//! Patch listeners.

use async_trait::async_trait;
use quadsearch_core::Patch;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Receives every Patch emitted after subscription.
///
/// A returned error is logged and counted by the hub; it does not stop
/// delivery of later Patches.
#[async_trait]
pub trait PatchListener: Send + Sync {
    /// Handle one Patch. The next Patch is not delivered until this resolves.
    async fn on_patch(&self, patch: &Patch) -> anyhow::Result<()>;

    /// Name used in logs.
    fn name(&self) -> &str {
        "anonymous"
    }
}

/// Listener backed by an async closure. Built with [`listener_fn`].
pub struct FnListener<F> {
    name: String,
    handler: F,
}

impl<F> fmt::Debug for FnListener<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnListener").field("name", &self.name).finish()
    }
}

#[async_trait]
impl<F, Fut> PatchListener for FnListener<F>
where
    F: Fn(Patch) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<()>> + Send,
{
    async fn on_patch(&self, patch: &Patch) -> anyhow::Result<()> {
        (self.handler)(patch.clone()).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Wrap an async closure as a listener.
///
/// ```ignore
/// let seen = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&seen);
/// store.subscribe(listener_fn("counter", move |patch| {
///     let counter = Arc::clone(&counter);
///     async move {
///         counter.fetch_add(patch.len(), Ordering::SeqCst);
///         Ok(())
///     }
/// }))?;
/// ```
pub fn listener_fn<F, Fut>(name: impl Into<String>, handler: F) -> Arc<dyn PatchListener>
where
    F: Fn(Patch) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Arc::new(FnListener {
        name: name.into(),
        handler,
    })
}
