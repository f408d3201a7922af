//! Bulk enumeration of index-worthy quads.
//!
//! A snapshot is a lazy stream over the store's current contents, already
//! filtered to quads whose object is a string literal. Quads keep their graph,
//! so a pulled document has the same id an incremental insert would give it.
//! Store errors are passed through as stream items rather than ending the
//! stream.

use crate::filter::is_indexable;
use crate::model::{Quad, QuadPattern};
use crate::traits::{QuadStore, QuadStream, QueryableStore};
use futures::future;
use futures::stream::{StreamExt, TryStreamExt};

/// Quad-constructing query for every string-literal quad in the default graph
/// and in every named graph.
///
/// Rows from the default-graph branch leave `?g` unbound and land in the
/// default graph; rows from the `GRAPH` branch keep their graph.
pub const SNAPSHOT_QUERY: &str = "CONSTRUCT { GRAPH ?g { ?s ?p ?o } } \
WHERE { { ?s ?p ?o } UNION { GRAPH ?g { ?s ?p ?o } } \
FILTER(isLiteral(?o) && (lang(?o) != \"\" || datatype(?o) IN \
(<http://www.w3.org/2001/XMLSchema#string>, <http://www.w3.org/1999/02/22-rdf-syntax-ns#langString>))) }";

/// Something that can enumerate index-worthy quads
pub trait SnapshotProducer: Send + Sync {
    /// Stream every index-worthy quad currently stored
    fn snapshot(&self) -> QuadStream<'_>;
}

fn keep_indexable(quad: &Quad) -> future::Ready<bool> {
    future::ready(is_indexable(quad))
}

/// Snapshot by pattern scan over a plain [`QuadStore`]
pub struct ScanSnapshot<S> {
    store: S,
}

impl<S: QuadStore> ScanSnapshot<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: QuadStore> SnapshotProducer for ScanSnapshot<S> {
    fn snapshot(&self) -> QuadStream<'_> {
        self.store
            .quads_matching(QuadPattern::any())
            .try_filter(keep_indexable)
            .boxed()
    }
}

/// Snapshot by evaluating [`SNAPSHOT_QUERY`] against a [`QueryableStore`].
///
/// Filtering happens in the store; results are passed through unchanged.
pub struct QuerySnapshot<S> {
    store: S,
}

impl<S: QueryableStore> QuerySnapshot<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: QueryableStore> SnapshotProducer for QuerySnapshot<S> {
    fn snapshot(&self) -> QuadStream<'_> {
        self.store
            .construct(SNAPSHOT_QUERY)
    }
}
