//! Similarity scoring, ranking, and threshold filtering.

use crate::corpus::{IndexedCollection, RankedCandidate};

/// Maximum number of candidates retrieval returns.
///
/// A fixed design constant, not configuration: the composer is built
/// around a handful of grounding chunks, and callers cannot widen it per
/// query.
pub const TOP_K: usize = 4;

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude, so a degenerate
/// embedding scores as irrelevant instead of producing NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Score every record against the query embedding and keep the best
/// [`TOP_K`].
///
/// The sort is stable and descending, so equal scores keep their
/// collection order and results are deterministic.
pub fn rank(collection: &IndexedCollection, query_embedding: &[f32]) -> Vec<RankedCandidate> {
    let mut candidates: Vec<RankedCandidate> = collection
        .records()
        .iter()
        .map(|record| RankedCandidate {
            record: record.clone(),
            similarity: cosine_similarity(&record.embedding, query_embedding),
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.similarity.partial_cmp(&a.similarity).unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(TOP_K);
    candidates
}

/// Drop candidates that do not score strictly above `threshold`.
///
/// A candidate whose similarity equals the threshold exactly is excluded.
/// An empty result means "no relevant context" and is handled by the
/// composer, not treated as an error.
pub fn filter_by_threshold(
    candidates: Vec<RankedCandidate>,
    threshold: f32,
) -> Vec<RankedCandidate> {
    candidates.into_iter().filter(|c| c.similarity > threshold).collect()
}
