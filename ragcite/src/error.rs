//! Error types for the `ragcite` crate.

use thiserror::Error;

/// Errors that can occur while indexing or answering.
///
/// Degenerate (zero-norm) vectors are not represented here: similarity
/// scoring defines them as 0.0 locally. An empty retrieval is not an
/// error either — it produces the sentinel answer.
#[derive(Debug, Error)]
pub enum RagError {
    /// The embedding collaborator failed for a given text.
    #[error("Embedding error ({provider}): {message}")]
    Embedding {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The generative-answer collaborator failed.
    #[error("Generation error ({provider}): {message}")]
    Generation {
        /// The generator that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The collection store failed to load or save a collection.
    #[error("Store error ({backend}): {message}")]
    Store {
        /// The storage backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A collaborator returned output the pipeline cannot use.
    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

/// A convenience result type for RAG operations.
pub type Result<T> = std::result::Result<T, RagError>;
