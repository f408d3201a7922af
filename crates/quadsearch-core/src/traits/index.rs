use crate::document::Document;
use crate::error::IndexResult;
use async_trait::async_trait;

/// One atomic unit of index mutation.
///
/// Deletions are applied before upserts, so an id in both lists ends up
/// present with the upserted content.
#[derive(Debug, Clone, Default)]
pub struct IndexBatch {
    /// Ids to remove; absent ids are ignored
    pub deletions: Vec<String>,
    /// Documents to insert or replace by id
    pub upserts: Vec<Document>,
}

impl IndexBatch {
    /// Check if the batch would change nothing
    pub fn is_empty(&self) -> bool {
        self.deletions.is_empty() && self.upserts.is_empty()
    }
}

/// Outcome of a committed batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitStats {
    /// Documents actually removed
    pub removed: usize,
    /// Documents inserted or replaced
    pub upserted: usize,
}

/// A combined full-text and vector query
#[derive(Debug, Clone)]
pub struct HybridQuery {
    /// Query text, matched against the text fields
    pub text: String,
    /// Query vector, matched against document embeddings
    pub embedding: Vec<f32>,
    /// Maximum number of hits
    pub limit: usize,
}

/// A document with its blended relevance
#[derive(Debug, Clone)]
pub struct ScoredDocument {
    pub document: Document,
    pub score: f32,
}

/// A document store supporting hybrid search.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Embedding length every document must carry
    fn dimensions(&self) -> usize;

    /// Apply a batch atomically: either all of it becomes visible or none
    async fn commit(&self, batch: IndexBatch) -> IndexResult<CommitStats>;

    /// Hits in descending relevance, at most `query.limit`
    async fn search(&self, query: &HybridQuery) -> IndexResult<Vec<ScoredDocument>>;

    /// Fetch a document by id
    async fn get(&self, id: &str) -> IndexResult<Option<Document>>;

    /// Number of indexed documents
    async fn len(&self) -> IndexResult<usize>;

    /// Check if the index holds no documents
    async fn is_empty(&self) -> IndexResult<bool> {
        Ok(self.len().await? == 0)
    }

    /// Drop every document
    async fn clear(&self) -> IndexResult<()>;
}
