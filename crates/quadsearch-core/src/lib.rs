//! # Quadsearch Core
//!
//! Shared vocabulary for keeping a search index in sync with a mutable quad
//! store:
//!
//! - [`model`]: terms, quads and the [`Patch`] batches that describe mutations
//! - [`filter`]: which quads carry searchable text
//! - [`skolem`]: content-derived document identifiers
//! - [`traits`]: the capability seams (store, embedding provider, search index)
//! - [`memory`]: an in-process quad store
//! - [`snapshot`]: bulk enumeration of index-worthy quads
//! - [`text`]: tokenisation shared by the embedder and lexical scoring
//!
//! Concrete index engines, embedding providers and change capture live in
//! sibling crates and depend on this one, never the other way round.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod document;
pub mod error;
pub mod filter;
pub mod memory;
pub mod model;
pub mod skolem;
pub mod snapshot;
pub mod text;
pub mod traits;
pub mod vocab;

pub use document::{Document, RankedResult};
pub use error::{
    EmbeddingError, EmbeddingResult, IndexError, IndexResult, StoreError, StoreResult,
};
pub use filter::{is_indexable, is_string_literal};
pub use memory::MemoryQuadStore;
pub use model::{GraphPattern, Iri, Literal, Patch, Quad, QuadPattern, Term};
pub use skolem::{canonical_form, skolemize, DEFAULT_GRAPH_SENTINEL};
pub use snapshot::{QuerySnapshot, ScanSnapshot, SnapshotProducer, SNAPSHOT_QUERY};
pub use text::tokenize;
pub use traits::{
    CommitStats, EmbeddingProvider, HybridQuery, IndexBatch, QuadStore, QuadStream,
    QueryableStore, ScoredDocument, SearchIndex,
};
