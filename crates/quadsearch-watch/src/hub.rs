//! Listener registry and per-listener ordered delivery.

use crate::error::{Error, Result};
use crate::listener::PatchListener;
use futures::FutureExt;
use parking_lot::Mutex;
use quadsearch_config::DeliveryMode;
use quadsearch_core::Patch;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, trace, warn};

tokio::task_local! {
    /// Hub whose listener is running on the current task, by address.
    static DELIVERING_FOR: usize;
}

/// Work item on a listener queue.
enum Envelope {
    /// Handle this Patch; signal `ack` once done, successful or not
    Patch {
        patch: Arc<Patch>,
        ack: Option<oneshot::Sender<()>>,
    },
    /// Signal once everything queued ahead of this has been handled
    Barrier(oneshot::Sender<()>),
}

struct Slot {
    id: u64,
    name: String,
    tx: mpsc::UnboundedSender<Envelope>,
}

#[derive(Default)]
struct DeliveryCounters {
    delivered: AtomicU64,
    failed: AtomicU64,
}

struct HubInner {
    slots: Mutex<Vec<Slot>>,
    next_id: AtomicU64,
    counters: Arc<DeliveryCounters>,
}

/// Point-in-time delivery statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HubStats {
    /// Currently registered listeners
    pub listeners: usize,
    /// Patches handled successfully, summed over listeners
    pub delivered: u64,
    /// Patches whose handler returned an error or panicked
    pub failed: u64,
}

/// Fan-out of Patches to independently queued listeners.
///
/// The hub owns its listener set; dropping the last clone closes every queue
/// and lets the worker tasks exit once they have drained.
#[derive(Clone)]
pub struct PatchHub {
    inner: Arc<HubInner>,
}

impl Default for PatchHub {
    fn default() -> Self {
        Self::new()
    }
}

impl PatchHub {
    /// Create a hub with no listeners.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(HubInner {
                slots: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
                counters: Arc::new(DeliveryCounters::default()),
            }),
        }
    }

    /// Register a listener and start its worker task.
    ///
    /// The listener receives every Patch emitted after this returns. Must be
    /// called from within a Tokio runtime.
    pub fn subscribe(&self, listener: Arc<dyn PatchListener>) -> Result<Subscription> {
        let name = listener.name().to_string();
        let handle = Handle::try_current().map_err(|_| Error::NoRuntime(name.clone()))?;

        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();
        handle.spawn(run_listener(
            self.key(),
            id,
            listener,
            rx,
            Arc::clone(&self.inner.counters),
        ));

        self.inner.slots.lock().push(Slot {
            id,
            name: name.clone(),
            tx,
        });
        info!(listener = %name, id, "Subscribed patch listener");

        Ok(Subscription {
            hub: Arc::downgrade(&self.inner),
            id,
            name,
        })
    }

    /// Queue a Patch for every current listener.
    ///
    /// The listener set is read once, so subscriptions made while this runs
    /// do not see the Patch. In synchronous mode this resolves only after
    /// every listener has finished with it.
    ///
    /// A listener that writes back to the store it listens on would wait on
    /// its own queue, so emissions from inside this hub's listeners are
    /// always detached.
    pub async fn emit(&self, patch: Patch, mode: DeliveryMode) {
        let mode = if mode == DeliveryMode::Synchronous && self.is_reentrant() {
            debug!("Patch emitted from inside a listener, delivering detached");
            DeliveryMode::Detached
        } else {
            mode
        };
        let patch = Arc::new(patch);
        let mut acks = Vec::new();

        {
            let slots = self.inner.slots.lock();
            trace!(
                insertions = patch.insertions.len(),
                deletions = patch.deletions.len(),
                listeners = slots.len(),
                mode = mode.as_str(),
                "Emitting patch"
            );

            for slot in slots.iter() {
                let ack = match mode {
                    DeliveryMode::Synchronous => {
                        let (ack_tx, ack_rx) = oneshot::channel();
                        acks.push(ack_rx);
                        Some(ack_tx)
                    }
                    DeliveryMode::Detached => None,
                };

                let envelope = Envelope::Patch {
                    patch: Arc::clone(&patch),
                    ack,
                };
                if slot.tx.send(envelope).is_err() {
                    warn!(
                        listener = %slot.name,
                        id = slot.id,
                        "Listener queue closed, patch dropped"
                    );
                }
            }
        }

        for ack in acks {
            // A dropped ack means the worker is gone; nothing left to wait for.
            let _ = ack.await;
        }
    }

    /// Wait until every Patch emitted before this call has been handled by
    /// every listener it was queued for.
    ///
    /// Called from inside one of this hub's listeners it returns at once,
    /// since that listener's queue cannot drain until it does.
    pub async fn drain(&self) {
        if self.is_reentrant() {
            warn!("drain() called from inside a listener, not waiting");
            return;
        }

        let barriers: Vec<_> = {
            let slots = self.inner.slots.lock();
            slots
                .iter()
                .filter_map(|slot| {
                    let (tx, rx) = oneshot::channel();
                    slot.tx.send(Envelope::Barrier(tx)).ok().map(|_| rx)
                })
                .collect()
        };

        for barrier in barriers {
            let _ = barrier.await;
        }
        debug!("Patch hub drained");
    }

    fn key(&self) -> usize {
        Arc::as_ptr(&self.inner) as usize
    }

    fn is_reentrant(&self) -> bool {
        DELIVERING_FOR
            .try_with(|hub| *hub == self.key())
            .unwrap_or(false)
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.slots.lock().len()
    }

    /// Snapshot of delivery counters.
    pub fn stats(&self) -> HubStats {
        HubStats {
            listeners: self.listener_count(),
            delivered: self.inner.counters.delivered.load(Ordering::Relaxed),
            failed: self.inner.counters.failed.load(Ordering::Relaxed),
        }
    }
}

/// Handle returned by [`PatchHub::subscribe`].
///
/// Dropping it does not unsubscribe; call [`Subscription::unsubscribe`].
#[derive(Debug)]
pub struct Subscription {
    hub: Weak<HubInner>,
    id: u64,
    name: String,
}

impl Subscription {
    /// Listener id, unique within its hub.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Listener name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stop delivering new Patches to this listener.
    ///
    /// Patches already queued are still handled. Returns `false` if the
    /// listener was already gone.
    pub fn unsubscribe(self) -> bool {
        let Some(hub) = self.hub.upgrade() else {
            return false;
        };

        let mut slots = hub.slots.lock();
        let before = slots.len();
        slots.retain(|slot| slot.id != self.id);
        let removed = slots.len() < before;

        if removed {
            info!(listener = %self.name, id = self.id, "Unsubscribed patch listener");
        }
        removed
    }
}

async fn run_listener(
    hub: usize,
    id: u64,
    listener: Arc<dyn PatchListener>,
    mut rx: mpsc::UnboundedReceiver<Envelope>,
    counters: Arc<DeliveryCounters>,
) {
    while let Some(envelope) = rx.recv().await {
        match envelope {
            Envelope::Patch { patch, ack } => {
                let outcome = DELIVERING_FOR
                    .scope(hub, AssertUnwindSafe(listener.on_patch(&patch)).catch_unwind())
                    .await;

                match outcome {
                    Ok(Ok(())) => {
                        counters.delivered.fetch_add(1, Ordering::Relaxed);
                        debug!(listener = listener.name(), id, size = patch.len(), "Patch handled");
                    }
                    Ok(Err(err)) => {
                        counters.failed.fetch_add(1, Ordering::Relaxed);
                        warn!(
                            listener = listener.name(),
                            id,
                            error = %err,
                            "Listener failed to handle patch"
                        );
                    }
                    Err(panic) => {
                        counters.failed.fetch_add(1, Ordering::Relaxed);
                        error!(
                            listener = listener.name(),
                            id,
                            panic = panic_message(panic.as_ref()),
                            "Listener panicked while handling patch"
                        );
                    }
                }

                if let Some(ack) = ack {
                    let _ = ack.send(());
                }
            }
            Envelope::Barrier(done) => {
                let _ = done.send(());
            }
        }
    }

    debug!(listener = listener.name(), id, "Listener queue closed");
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}
