//! Embedding provider trait for generating vector embeddings from text.

use async_trait::async_trait;

use crate::error::Result;

/// A provider that turns text into fixed-size dense vectors.
///
/// The pipeline embeds corpus chunks through
/// [`embed_batch`](EmbeddingProvider::embed_batch) at indexing time and
/// the user's question through [`embed`](EmbeddingProvider::embed) at
/// query time. One provider must serve both roles for a collection, so
/// that dimensionality stays consistent across its lifetime.
///
/// A provider may signal that a particular text cannot be embedded by
/// returning an empty vector for it; the indexer omits that record.
/// Actual failures should be returned as errors, which propagate to the
/// caller.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embedding vectors for a batch of text inputs.
    ///
    /// The default implementation calls [`embed`](EmbeddingProvider::embed)
    /// sequentially for each input. Override this method if the backend
    /// supports native batch embedding for better throughput.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// Return the dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;
}
