//! # Quadsearch Index
//!
//! The write and read sides of the search index:
//!
//! - [`IndexWriter`] applies Patches (and whole snapshots) to a
//!   [`SearchIndex`](quadsearch_core::SearchIndex). It is a
//!   [`PatchListener`](quadsearch_watch::PatchListener), so subscribing it to a
//!   [`PatchingStore`](quadsearch_watch::PatchingStore) is all the wiring needed.
//! - [`SearchReader`] turns a text query into ranked subjects.
//! - [`MemorySearchIndex`] is the in-process hybrid BM25 + vector index.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod memory;
pub mod reader;
pub mod writer;

pub use memory::{MemorySearchIndex, RankingConfig};
pub use reader::SearchReader;
pub use writer::{IndexWriter, PullStats};
