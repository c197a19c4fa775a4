//! Generative-answer trait for grounding answers in retrieved context.

use async_trait::async_trait;

use crate::error::Result;

/// A collaborator that writes a free-text answer from retrieved context.
///
/// Called by the composer on the narrative (PDF) branch with the user's
/// question and the newline-joined candidate texts. Its internals — model,
/// prompt, hosting — are out of scope for this crate; failures propagate
/// to the caller unchanged and are never substituted with a default
/// answer.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// Generate an answer to `question` grounded in `context`.
    async fn generate(&self, question: &str, context: &str) -> Result<String>;
}
