//! Change capture behaviour through the public API

use anyhow::anyhow;
use async_trait::async_trait;
use futures::TryStreamExt;
use parking_lot::Mutex;
use quadsearch_core::{
    Literal, MemoryQuadStore, Patch, Quad, QuadPattern, QuadStore, QuadStream, StoreError,
    StoreResult, Term,
};
use quadsearch_watch::{listener_fn, DeliveryMode, PatchListener, PatchingStore};
use std::sync::Arc;
use std::time::Duration;

fn quad(n: usize) -> Quad {
    Quad::new(
        Term::iri(format!("https://example.org/item/{}", n)),
        "https://example.org/label",
        Literal::plain(format!("item {}", n)),
    )
}

/// Records every Patch it sees
#[derive(Default)]
struct Recorder {
    patches: Mutex<Vec<Patch>>,
}

impl Recorder {
    fn patches(&self) -> Vec<Patch> {
        self.patches.lock().clone()
    }
}

#[async_trait]
impl PatchListener for Recorder {
    async fn on_patch(&self, patch: &Patch) -> anyhow::Result<()> {
        self.patches.lock().push(patch.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "recorder"
    }
}

#[tokio::test]
async fn test_each_call_emits_one_patch() {
    let store = PatchingStore::new(MemoryQuadStore::new(), DeliveryMode::Detached);
    let recorder = Arc::new(Recorder::default());
    let _sub = store.subscribe(recorder.clone()).expect("subscribe");

    store.insert_one(&quad(1)).await.expect("insert_one");
    store
        .insert_many(&[quad(2), quad(3), quad(2)])
        .await
        .expect("insert_many");
    store.delete_one(&quad(1)).await.expect("delete_one");
    store
        .delete_many(&[quad(3), quad(2)])
        .await
        .expect("delete_many");
    store.drain().await;

    assert_eq!(
        recorder.patches(),
        vec![
            Patch::insert(vec![quad(1)]),
            Patch::insert(vec![quad(2), quad(3), quad(2)]),
            Patch::delete(vec![quad(1)]),
            Patch::delete(vec![quad(3), quad(2)]),
        ]
    );
}

#[tokio::test]
async fn test_fan_out_to_independent_listeners() {
    let store = PatchingStore::new(MemoryQuadStore::new(), DeliveryMode::Detached);
    let first = Arc::new(Recorder::default());
    let second = Arc::new(Recorder::default());
    let _a = store.subscribe(first.clone()).expect("subscribe");
    let _b = store.subscribe(second.clone()).expect("subscribe");

    store.insert_one(&quad(1)).await.expect("insert");
    store.drain().await;

    assert_eq!(first.patches().len(), 1);
    assert_eq!(first.patches(), second.patches());
}

#[tokio::test]
async fn test_unsubscribed_listener_receives_nothing_further() {
    let store = PatchingStore::new(MemoryQuadStore::new(), DeliveryMode::Detached);
    let recorder = Arc::new(Recorder::default());
    let subscription = store.subscribe(recorder.clone()).expect("subscribe");

    store.insert_one(&quad(1)).await.expect("insert");
    assert!(subscription.unsubscribe());
    store.insert_one(&quad(2)).await.expect("insert");
    store.delete_one(&quad(1)).await.expect("delete");
    store.drain().await;

    // Give a lingering worker a chance to misbehave
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(recorder.patches(), vec![Patch::insert(vec![quad(1)])]);
    assert_eq!(store.hub().listener_count(), 0);
}

#[tokio::test]
async fn test_slow_listener_handles_patches_one_at_a_time() {
    let store = PatchingStore::new(MemoryQuadStore::new(), DeliveryMode::Detached);
    let events = Arc::new(Mutex::new(Vec::new()));

    let log = Arc::clone(&events);
    let _sub = store
        .subscribe(listener_fn("slow", move |patch: Patch| {
            let log = Arc::clone(&log);
            async move {
                let label = patch.insertions[0].object.value().to_string();
                log.lock().push(format!("start {}", label));
                tokio::time::sleep(Duration::from_millis(30)).await;
                log.lock().push(format!("end {}", label));
                Ok(())
            }
        }))
        .expect("subscribe");

    store.insert_one(&quad(1)).await.expect("insert");
    store.insert_one(&quad(2)).await.expect("insert");
    store.drain().await;

    assert_eq!(
        *events.lock(),
        vec!["start item 1", "end item 1", "start item 2", "end item 2"]
    );
}

#[tokio::test]
async fn test_synchronous_mode_waits_for_listeners() {
    let store = PatchingStore::new(MemoryQuadStore::new(), DeliveryMode::Synchronous);
    let recorder = Arc::new(Recorder::default());
    let _sub = store.subscribe(recorder.clone()).expect("subscribe");

    store.insert_one(&quad(1)).await.expect("insert");

    // No drain: the call itself waited
    assert_eq!(recorder.patches().len(), 1);
    assert_eq!(store.stats().delivered, 1);
}

#[tokio::test]
async fn test_listener_failures_are_isolated() {
    let store = PatchingStore::new(MemoryQuadStore::new(), DeliveryMode::Synchronous);
    let recorder = Arc::new(Recorder::default());

    let _failing = store
        .subscribe(listener_fn("failing", |_patch| async {
            Err(anyhow!("index unavailable"))
        }))
        .expect("subscribe");
    let _panicking = store
        .subscribe(listener_fn("panicking", |patch: Patch| async move {
            assert!(patch.is_empty(), "listener bug");
            Ok(())
        }))
        .expect("subscribe");
    let _healthy = store.subscribe(recorder.clone()).expect("subscribe");

    store.insert_one(&quad(1)).await.expect("mutation must not see listener errors");
    store.insert_one(&quad(2)).await.expect("queues keep running after failures");

    assert_eq!(recorder.patches().len(), 2);
    let stats = store.stats();
    assert_eq!(stats.delivered, 2);
    assert_eq!(stats.failed, 4);
    assert_eq!(stats.listeners, 3);
}

#[tokio::test]
async fn test_listener_added_during_emission_misses_that_patch() {
    let store = PatchingStore::new(MemoryQuadStore::new(), DeliveryMode::Synchronous);
    let late = Arc::new(Recorder::default());
    let held = Arc::new(Mutex::new(Vec::new()));

    let hub = store.hub().clone();
    let (late_listener, keep) = (Arc::clone(&late), Arc::clone(&held));
    let _registrar = store
        .subscribe(listener_fn("registrar", move |_patch| {
            let hub = hub.clone();
            let late = Arc::clone(&late_listener);
            let keep = Arc::clone(&keep);
            async move {
                if keep.lock().is_empty() {
                    let subscription = hub.subscribe(late)?;
                    keep.lock().push(subscription);
                }
                Ok(())
            }
        }))
        .expect("subscribe");

    store.insert_one(&quad(1)).await.expect("insert");
    assert_eq!(held.lock().len(), 1);
    assert!(late.patches().is_empty());

    store.insert_one(&quad(2)).await.expect("insert");
    store.drain().await;
    assert_eq!(late.patches(), vec![Patch::insert(vec![quad(2)])]);
}

#[tokio::test]
async fn test_synchronous_write_back_from_listener_completes() {
    let store = Arc::new(PatchingStore::new(
        MemoryQuadStore::new(),
        DeliveryMode::Synchronous,
    ));
    let recorder = Arc::new(Recorder::default());
    let _recorder = store.subscribe(recorder.clone()).expect("subscribe");

    let echo_store = Arc::clone(&store);
    let _echo = store
        .subscribe(listener_fn("echo", move |patch: Patch| {
            let store = Arc::clone(&echo_store);
            async move {
                let first = patch.insertions.first().map(|q| q.object.value().to_string());
                if first.as_deref() == Some("item 1") {
                    store.insert_one(&quad(2)).await?;
                }
                Ok(())
            }
        }))
        .expect("subscribe");

    tokio::time::timeout(Duration::from_secs(5), store.insert_one(&quad(1)))
        .await
        .expect("write-back must not wait on the writing listener")
        .expect("insert");
    store.drain().await;

    assert!(store.contains(&quad(2)).await.expect("contains"));
    assert_eq!(
        recorder.patches(),
        vec![Patch::insert(vec![quad(1)]), Patch::insert(vec![quad(2)])]
    );
    assert_eq!(store.stats().failed, 0);
}

#[tokio::test]
async fn test_reads_pass_through_without_patches() {
    let store = PatchingStore::new(
        MemoryQuadStore::with_quads([quad(1), quad(2)]),
        DeliveryMode::Detached,
    );
    let recorder = Arc::new(Recorder::default());
    let _sub = store.subscribe(recorder.clone()).expect("subscribe");

    let all: Vec<Quad> = store
        .quads_matching(QuadPattern::any())
        .try_collect()
        .await
        .expect("scan");
    assert_eq!(all.len(), 2);
    assert!(store.contains(&quad(1)).await.expect("contains"));
    assert_eq!(store.len().await.expect("len"), 2);
    store.drain().await;

    assert!(recorder.patches().is_empty());
}

/// Store that rejects every write
struct ReadOnlyStore;

#[async_trait]
impl QuadStore for ReadOnlyStore {
    async fn insert_one(&self, _quad: &Quad) -> StoreResult<()> {
        Err(StoreError::backend("read only"))
    }

    async fn insert_many(&self, _quads: &[Quad]) -> StoreResult<()> {
        Err(StoreError::backend("read only"))
    }

    async fn delete_one(&self, _quad: &Quad) -> StoreResult<()> {
        Err(StoreError::backend("read only"))
    }

    async fn delete_many(&self, _quads: &[Quad]) -> StoreResult<()> {
        Err(StoreError::backend("read only"))
    }

    fn quads_matching(&self, _pattern: QuadPattern) -> QuadStream<'_> {
        Box::pin(futures::stream::empty())
    }

    async fn contains(&self, _quad: &Quad) -> StoreResult<bool> {
        Ok(false)
    }

    async fn len(&self) -> StoreResult<usize> {
        Ok(0)
    }
}

#[tokio::test]
async fn test_failed_mutation_emits_nothing() {
    let store = PatchingStore::new(ReadOnlyStore, DeliveryMode::Synchronous);
    let recorder = Arc::new(Recorder::default());
    let _sub = store.subscribe(recorder.clone()).expect("subscribe");

    match store.insert_one(&quad(1)).await {
        Err(StoreError::Backend(msg)) => assert_eq!(msg, "read only"),
        other => panic!("Expected backend error, got: {:?}", other),
    }
    assert!(store.delete_many(&[quad(1)]).await.is_err());
    store.drain().await;

    assert!(recorder.patches().is_empty());
    assert_eq!(store.stats().delivered, 0);
}
