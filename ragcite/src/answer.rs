//! Answer composition: listing or narrative body plus the citation block.

use std::sync::Arc;

use tracing::debug;

use crate::corpus::{RankedCandidate, SourceKind};
use crate::error::Result;
use crate::generation::AnswerGenerator;

/// Fixed answer produced when no candidate survives the threshold.
///
/// Streamed like any other answer; no citation block follows it.
pub const NO_CONTEXT_ANSWER: &str =
    "No relevant information was found in the documents. Please rephrase your question.";

/// Introductory line of a listing answer over tabular sources.
pub const LISTING_INTRO: &str = "Relevant data found:";

/// Header separating the answer body from the citation lines.
const SOURCES_HEADER: &str = "Sources:";

/// Citation grouping: source kind → segment → positions, all in
/// first-seen candidate order.
///
/// Built per query for the citation block only; `Vec`-backed so iteration
/// order is exactly insertion order.
struct SourceCitation {
    groups: Vec<(SourceKind, Vec<(u32, Vec<u32>)>)>,
}

impl SourceCitation {
    fn from_candidates(candidates: &[RankedCandidate]) -> Self {
        let mut groups: Vec<(SourceKind, Vec<(u32, Vec<u32>)>)> = Vec::new();

        for candidate in candidates {
            let record = &candidate.record;
            let group = match groups.iter().position(|(kind, _)| *kind == record.source) {
                Some(i) => i,
                None => {
                    groups.push((record.source, Vec::new()));
                    groups.len() - 1
                }
            };
            let segments = &mut groups[group].1;
            match segments.iter_mut().find(|(segment, _)| *segment == record.segment) {
                Some((_, positions)) => positions.push(record.position),
                None => segments.push((record.segment, vec![record.position])),
            }
        }

        Self { groups }
    }

    /// Whether any candidate came from a tabular source.
    fn any_tabular(&self) -> bool {
        self.groups.iter().any(|(kind, _)| match kind {
            SourceKind::Excel | SourceKind::Csv => true,
            SourceKind::Pdf => false,
        })
    }

    /// Render one `- {source}, Page {segment}: Sections {positions}` line
    /// per (source, segment) pair. This format is a wire contract.
    fn render(&self) -> String {
        let mut block = String::new();
        for (kind, segments) in &self.groups {
            for (segment, positions) in segments {
                let positions = positions
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                block.push_str(&format!("- {kind}, Page {segment}: Sections {positions}\n"));
            }
        }
        block
    }
}

/// Composes the final answer text from the filtered candidates.
///
/// Tabular candidates (any Excel/CSV among them) are listed verbatim;
/// otherwise the generative collaborator writes a narrative answer over
/// the joined context. Either body is followed by the citation block.
pub struct AnswerComposer {
    generator: Arc<dyn AnswerGenerator>,
}

impl AnswerComposer {
    /// Create a composer backed by the given generator.
    pub fn new(generator: Arc<dyn AnswerGenerator>) -> Self {
        Self { generator }
    }

    /// Compose the answer for `question` from `candidates` (ranked order).
    ///
    /// An empty candidate list yields [`NO_CONTEXT_ANSWER`] with no
    /// citations.
    ///
    /// # Errors
    ///
    /// Propagates [`RagError::Generation`](crate::RagError::Generation)
    /// from the narrative branch unchanged; no default answer is
    /// substituted.
    pub async fn compose(&self, question: &str, candidates: &[RankedCandidate]) -> Result<String> {
        if candidates.is_empty() {
            debug!("no candidates above threshold, using sentinel answer");
            return Ok(NO_CONTEXT_ANSWER.to_string());
        }

        let citation = SourceCitation::from_candidates(candidates);

        let mut answer = if citation.any_tabular() {
            let mut body = String::from(LISTING_INTRO);
            body.push('\n');
            for candidate in candidates {
                body.push_str(&format!("- {}\n", candidate.record.text));
            }
            body
        } else {
            let context: Vec<&str> =
                candidates.iter().map(|c| c.record.text.as_str()).collect();
            self.generator.generate(question, &context.join("\n")).await?
        };

        answer.push_str("\n\n");
        answer.push_str(SOURCES_HEADER);
        answer.push('\n');
        answer.push_str(&citation.render());
        Ok(answer)
    }
}
