use crate::error::EmbeddingResult;
use async_trait::async_trait;

/// Maps text to a fixed-length vector.
///
/// Implementations must return exactly [`dimensions`](Self::dimensions)
/// values for every input.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text
    async fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>>;

    /// Embed several texts, in order
    async fn embed_batch(&self, texts: &[String]) -> EmbeddingResult<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }

    /// Output vector length
    fn dimensions(&self) -> usize;

    /// Model identifier, for logs
    fn model_name(&self) -> &str;
}
