//! Pipeline orchestrator.
//!
//! The [`RagPipeline`] wires an [`EmbeddingProvider`], an
//! [`AnswerGenerator`], and an optional [`CollectionStore`] into the two
//! operations the surrounding application calls: computing embeddings for
//! a corpus and generating a streamed, cited answer for a question.
//!
//! # Example
//!
//! ```rust,ignore
//! use ragcite::{RagPipeline, RagConfig, InMemoryCollectionStore};
//!
//! let pipeline = RagPipeline::builder()
//!     .config(RagConfig::default())
//!     .embedding_provider(Arc::new(my_embedder))
//!     .answer_generator(Arc::new(my_generator))
//!     .collection_store(Arc::new(InMemoryCollectionStore::new()))
//!     .build()?;
//!
//! let collection = pipeline.index_document("manual.pdf", &corpus).await?;
//! let mut stream = pipeline.response_generator("how do I reset it?", &collection).await?;
//! while let Some(chunk) = stream.next().await {
//!     print!("{chunk}");
//! }
//! ```

use std::sync::Arc;

use tracing::{error, info};

use crate::answer::AnswerComposer;
use crate::config::RagConfig;
use crate::corpus::{Corpus, IndexedCollection};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::generation::AnswerGenerator;
use crate::indexer::CorpusIndexer;
use crate::ranking;
use crate::store::CollectionStore;
use crate::stream::{AnswerStream, stream_words};

/// The retrieval-and-answering orchestrator.
///
/// Holds the collaborators for one document workflow and drives one query
/// at a time: embed the question, rank the collection, filter by
/// threshold, compose the answer, stream it. Construct one via
/// [`RagPipeline::builder()`].
pub struct RagPipeline {
    config: RagConfig,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    collection_store: Option<Arc<dyn CollectionStore>>,
    indexer: CorpusIndexer,
    composer: AnswerComposer,
}

impl RagPipeline {
    /// Create a new [`RagPipelineBuilder`].
    pub fn builder() -> RagPipelineBuilder {
        RagPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Return a reference to the embedding provider.
    pub fn embedding_provider(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.embedding_provider
    }

    /// Index a corpus into an embedded collection.
    ///
    /// One record per (segment, chunk) pair, in segment-then-position
    /// order. The collection is returned to the caller; persisting it is
    /// either the caller's business or [`index_document`](Self::index_document)'s.
    ///
    /// # Errors
    ///
    /// Propagates embedding failures from the provider.
    pub async fn compute_embeddings(&self, corpus: &Corpus) -> Result<IndexedCollection> {
        self.indexer.index(corpus).await.inspect_err(|e| {
            error!(error = %e, "corpus indexing failed");
        })
    }

    /// Index a document, reusing the stored collection when one exists.
    ///
    /// Consults the collection store under `filename` first: a hit is
    /// returned untouched (the store is keyed by name alone — see
    /// [`CollectionStore`]); a miss indexes the corpus, stores the
    /// result, and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if no store is configured, and
    /// propagates store and embedding failures.
    pub async fn index_document(
        &self,
        filename: &str,
        corpus: &Corpus,
    ) -> Result<IndexedCollection> {
        let store = self.collection_store.as_ref().ok_or_else(|| {
            RagError::Config("index_document requires a collection_store".to_string())
        })?;

        if let Some(existing) = store.load(filename).await? {
            info!(filename, record_count = existing.len(), "reusing stored collection");
            return Ok(existing);
        }

        let collection = self.compute_embeddings(corpus).await?;
        store.save(filename, &collection).await.inspect_err(|e| {
            error!(filename, error = %e, "failed to store collection");
        })?;
        info!(filename, record_count = collection.len(), "indexed and stored document");
        Ok(collection)
    }

    /// Answer a question over an indexed collection as a word stream.
    ///
    /// Runs the full query path — embed the question, rank by cosine
    /// similarity, drop candidates at or below the threshold, compose the
    /// answer (listing for tabular sources, generated narrative
    /// otherwise) with its citation block — and returns the composed text
    /// as a lazy word-by-word stream paced by the configured delay.
    ///
    /// An empty retrieval is not an error: the stream carries the fixed
    /// no-context answer.
    ///
    /// # Errors
    ///
    /// Propagates embedding and generation failures; both surface before
    /// the first chunk is produced.
    pub async fn response_generator(
        &self,
        question: &str,
        collection: &IndexedCollection,
    ) -> Result<AnswerStream> {
        let query_embedding = self.embedding_provider.embed(question).await.inspect_err(|e| {
            error!(error = %e, "question embedding failed");
        })?;

        let ranked = ranking::rank(collection, &query_embedding);
        let relevant = ranking::filter_by_threshold(ranked, self.config.similarity_threshold);
        info!(
            candidate_count = relevant.len(),
            threshold = self.config.similarity_threshold,
            "retrieval completed"
        );

        let answer = self.composer.compose(question, &relevant).await.inspect_err(|e| {
            error!(error = %e, "answer composition failed");
        })?;

        Ok(stream_words(answer, self.config.stream_delay))
    }
}

/// Builder for constructing a [`RagPipeline`].
///
/// `config`, `embedding_provider`, and `answer_generator` are required;
/// `collection_store` is optional and only needed for
/// [`RagPipeline::index_document`].
#[derive(Default)]
pub struct RagPipelineBuilder {
    config: Option<RagConfig>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    answer_generator: Option<Arc<dyn AnswerGenerator>>,
    collection_store: Option<Arc<dyn CollectionStore>>,
}

impl RagPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Set the generative-answer collaborator.
    pub fn answer_generator(mut self, generator: Arc<dyn AnswerGenerator>) -> Self {
        self.answer_generator = Some(generator);
        self
    }

    /// Set an optional collection store for document-level indexing.
    pub fn collection_store(mut self, store: Arc<dyn CollectionStore>) -> Self {
        self.collection_store = Some(store);
        self
    }

    /// Build the [`RagPipeline`], validating that all required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if any required field is missing.
    pub fn build(self) -> Result<RagPipeline> {
        let config =
            self.config.ok_or_else(|| RagError::Config("config is required".to_string()))?;
        let embedding_provider = self
            .embedding_provider
            .ok_or_else(|| RagError::Config("embedding_provider is required".to_string()))?;
        let answer_generator = self
            .answer_generator
            .ok_or_else(|| RagError::Config("answer_generator is required".to_string()))?;

        Ok(RagPipeline {
            config,
            indexer: CorpusIndexer::new(Arc::clone(&embedding_provider)),
            composer: AnswerComposer::new(answer_generator),
            embedding_provider,
            collection_store: self.collection_store,
        })
    }
}
