//! Property tests for similarity scoring and ranking.

use proptest::prelude::*;
use ragcite::{IndexedCollection, IndexedRecord, SourceKind, TOP_K, cosine_similarity, ranking};

const DIM: usize = 16;

/// Generate a non-zero L2-normalized embedding of the given dimension.
fn arb_normalized_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim).prop_filter_map("non-zero embedding", |mut v| {
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm < 1e-8 {
            return None;
        }
        for val in &mut v {
            *val /= norm;
        }
        Some(v)
    })
}

fn collection_from(embeddings: Vec<Vec<f32>>) -> IndexedCollection {
    let records = embeddings
        .into_iter()
        .enumerate()
        .map(|(i, embedding)| IndexedRecord {
            segment: i as u32,
            position: 0,
            embedding,
            text: format!("chunk {i}"),
            source: SourceKind::Pdf,
        })
        .collect();
    IndexedCollection::new(records)
}

/// *For any* collection of records with non-zero embeddings, ranking
/// against a query SHALL return at most [`TOP_K`] candidates ordered by
/// descending cosine similarity.
mod prop_rank_ordering {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn ranked_candidates_descend_and_respect_top_k(
            embeddings in proptest::collection::vec(arb_normalized_embedding(DIM), 1..40),
            query in arb_normalized_embedding(DIM),
        ) {
            let record_count = embeddings.len();
            let collection = collection_from(embeddings);
            let ranked = ranking::rank(&collection, &query);

            prop_assert!(ranked.len() <= TOP_K);
            prop_assert!(ranked.len() <= record_count);

            for window in ranked.windows(2) {
                prop_assert!(
                    window[0].similarity >= window[1].similarity,
                    "candidates not in descending order: {} < {}",
                    window[0].similarity,
                    window[1].similarity,
                );
            }
        }

        #[test]
        fn no_filtered_candidate_sits_at_or_below_the_threshold(
            embeddings in proptest::collection::vec(arb_normalized_embedding(DIM), 1..40),
            query in arb_normalized_embedding(DIM),
            threshold in -1.0f32..1.0f32,
        ) {
            let collection = collection_from(embeddings);
            let ranked = ranking::rank(&collection, &query);
            let kept = ranking::filter_by_threshold(ranked, threshold);

            for candidate in &kept {
                prop_assert!(candidate.similarity > threshold);
            }
        }
    }
}

/// *For any* non-zero vector, cosine similarity SHALL be 1 with itself
/// and -1 with its negation, within floating tolerance.
mod prop_cosine_identities {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn self_similarity_is_one(v in arb_normalized_embedding(DIM)) {
            prop_assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-5);
        }

        #[test]
        fn negated_similarity_is_minus_one(v in arb_normalized_embedding(DIM)) {
            let neg: Vec<f32> = v.iter().map(|x| -x).collect();
            prop_assert!((cosine_similarity(&v, &neg) + 1.0).abs() < 1e-5);
        }

        #[test]
        fn zero_vector_similarity_is_exactly_zero(v in arb_normalized_embedding(DIM)) {
            let zero = vec![0.0f32; DIM];
            prop_assert_eq!(cosine_similarity(&v, &zero), 0.0);
        }
    }
}
