//! Corpus indexing: turning extracted text into an embedded collection.

use std::sync::Arc;

use tracing::{debug, info};

use crate::corpus::{Corpus, IndexedCollection, IndexedRecord, SourceKind};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

/// Indexes a [`Corpus`] into an [`IndexedCollection`].
///
/// Walks segments in ascending order and chunks in segment order,
/// batch-embedding one segment's chunks at a time. Every record defaults
/// to [`SourceKind::Pdf`]; callers that extracted a tabular document
/// rewrite the kind afterward via
/// [`IndexedCollection::with_source`].
pub struct CorpusIndexer {
    provider: Arc<dyn EmbeddingProvider>,
}

impl CorpusIndexer {
    /// Create an indexer backed by the given embedding provider.
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self { provider }
    }

    /// Index a corpus: one record per (segment, chunk) pair.
    ///
    /// Empty chunk texts are embedded like any other text. A chunk the
    /// provider marks unembeddable (empty vector) is omitted; the
    /// surviving records keep their original positions, so the same
    /// corpus always indexes to the same collection.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Embedding`] if the provider fails, and
    /// [`RagError::Pipeline`] if a batch result does not line up with its
    /// input.
    pub async fn index(&self, corpus: &Corpus) -> Result<IndexedCollection> {
        let mut records = Vec::new();

        for (&segment, chunks) in corpus {
            if chunks.is_empty() {
                continue;
            }

            let texts: Vec<&str> = chunks.iter().map(String::as_str).collect();
            let embeddings = self.provider.embed_batch(&texts).await?;
            if embeddings.len() != texts.len() {
                return Err(RagError::Pipeline(format!(
                    "provider returned {} embeddings for {} chunks in segment {segment}",
                    embeddings.len(),
                    texts.len()
                )));
            }

            for (position, (text, embedding)) in chunks.iter().zip(embeddings).enumerate() {
                if embedding.is_empty() {
                    debug!(segment, position, "chunk not embeddable, omitting record");
                    continue;
                }
                records.push(IndexedRecord {
                    segment,
                    position: position as u32,
                    embedding,
                    text: text.clone(),
                    source: SourceKind::default(),
                });
            }
        }

        info!(record_count = records.len(), "indexed corpus");
        Ok(IndexedCollection::new(records))
    }
}
