//! # ragcite
//!
//! Minimal retrieval-augmented answering core with source citations and
//! streamed word-by-word delivery.
//!
//! ## Overview
//!
//! Given a corpus of text chunks keyed by segment (a PDF page or a
//! spreadsheet row) and a user question, `ragcite` retrieves the most
//! relevant chunks by cosine similarity, composes a grounded answer —
//! a generated narrative for PDF sources, a literal listing for tabular
//! ones — appends a deterministic citation block, and delivers the
//! result as a lazy stream of word chunks.
//!
//! The crate exposes two operations through [`RagPipeline`]:
//!
//! - [`compute_embeddings`](RagPipeline::compute_embeddings) — index a
//!   [`Corpus`] into an [`IndexedCollection`]
//! - [`response_generator`](RagPipeline::response_generator) — answer a
//!   question over a collection as an [`AnswerStream`]
//!
//! Everything around those two calls — chat UI, file upload, document
//! text extraction — is the caller's concern. The caller supplies the
//! collaborators as trait objects: an [`EmbeddingProvider`], an
//! [`AnswerGenerator`], and optionally a [`CollectionStore`] so repeated
//! uploads of the same filename skip re-embedding.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use futures::StreamExt;
//! use ragcite::{Corpus, RagConfig, RagPipeline};
//!
//! let pipeline = RagPipeline::builder()
//!     .config(RagConfig::default())
//!     .embedding_provider(Arc::new(embedder))
//!     .answer_generator(Arc::new(generator))
//!     .build()?;
//!
//! let corpus: Corpus = [(0, vec!["first page text".to_string()])].into();
//! let collection = pipeline.compute_embeddings(&corpus).await?;
//!
//! let mut stream = pipeline.response_generator("what does page one say?", &collection).await?;
//! while let Some(chunk) = stream.next().await {
//!     print!("{chunk}");
//! }
//! ```
//!
//! ## Design constants
//!
//! - Retrieval keeps at most [`TOP_K`](ranking::TOP_K) = 4 candidates.
//! - Candidates must score strictly above the configured
//!   `similarity_threshold` to be used.
//! - Degenerate (zero-norm) embeddings score 0.0 rather than erroring.
//! - An empty retrieval streams [`NO_CONTEXT_ANSWER`] instead of failing.
//!
//! ## Features
//!
//! - `openai` — [`OpenAIEmbeddingProvider`](openai::OpenAIEmbeddingProvider)
//!   and [`OpenAIAnswerGenerator`](openai::OpenAIAnswerGenerator) over the
//!   OpenAI HTTP API via `reqwest`.

pub mod answer;
pub mod config;
pub mod corpus;
pub mod embedding;
pub mod error;
pub mod generation;
pub mod indexer;
#[cfg(feature = "openai")]
pub mod openai;
pub mod pipeline;
pub mod ranking;
pub mod store;
pub mod stream;

pub use answer::{AnswerComposer, LISTING_INTRO, NO_CONTEXT_ANSWER};
pub use config::{DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_STREAM_DELAY, RagConfig, RagConfigBuilder};
pub use corpus::{Corpus, IndexedCollection, IndexedRecord, RankedCandidate, SourceKind};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use generation::AnswerGenerator;
pub use indexer::CorpusIndexer;
pub use pipeline::{RagPipeline, RagPipelineBuilder};
pub use ranking::{TOP_K, cosine_similarity};
pub use store::{CollectionStore, InMemoryCollectionStore};
pub use stream::{AnswerStream, stream_words};
