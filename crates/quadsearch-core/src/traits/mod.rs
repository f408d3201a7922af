//! Capability seams between the sync machinery and its collaborators.
//!
//! Every trait here is object safe so callers can hold `Arc<dyn ...>` and swap
//! implementations (in-memory for tests, remote for production) freely.

mod embedding;
mod index;
mod store;

pub use embedding::EmbeddingProvider;
pub use index::{CommitStats, HybridQuery, IndexBatch, ScoredDocument, SearchIndex};
pub use store::{QuadStore, QuadStream, QueryableStore};
