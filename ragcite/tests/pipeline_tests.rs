//! End-to-end tests for the answering pipeline with fixture collaborators.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use futures::StreamExt;
use ragcite::{
    AnswerComposer, AnswerGenerator, Corpus, EmbeddingProvider, IndexedCollection, IndexedRecord,
    InMemoryCollectionStore, NO_CONTEXT_ANSWER, RagConfig, RagError, RagPipeline, RankedCandidate,
    SourceKind,
};

const DIM: usize = 3;

/// Embedding provider returning hand-picked vectors per exact text.
///
/// Texts mapped to an empty vector count as "not embeddable"; unknown
/// texts are an error, so a test notices any unexpected lookup. Counts
/// `embed` calls so caching behavior is observable.
struct FixtureEmbeddings {
    vectors: HashMap<String, Vec<f32>>,
    calls: AtomicUsize,
}

impl FixtureEmbeddings {
    fn new(entries: &[(&str, Vec<f32>)]) -> Self {
        Self {
            vectors: entries.iter().map(|(t, v)| (t.to_string(), v.clone())).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    fn embed_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for FixtureEmbeddings {
    async fn embed(&self, text: &str) -> ragcite::Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.vectors.get(text).cloned().ok_or_else(|| RagError::Embedding {
            provider: "fixture".into(),
            message: format!("no fixture vector for '{text}'"),
        })
    }

    fn dimensions(&self) -> usize {
        DIM
    }
}

/// Generator returning a fixed answer body.
struct CannedGenerator(&'static str);

#[async_trait]
impl AnswerGenerator for CannedGenerator {
    async fn generate(&self, _question: &str, _context: &str) -> ragcite::Result<String> {
        Ok(self.0.to_string())
    }
}

/// Generator that always fails.
struct FailingGenerator;

#[async_trait]
impl AnswerGenerator for FailingGenerator {
    async fn generate(&self, _question: &str, _context: &str) -> ragcite::Result<String> {
        Err(RagError::Generation {
            provider: "failing".into(),
            message: "model unavailable".into(),
        })
    }
}

const QUESTION: &str = "which modules are available?";
const CHUNK_ROUTER: &str = "Router supports SFP modules";
const CHUNK_WEATHER: &str = "Unrelated text about weather";
const CHUNK_INVENTORY: &str = "Inventory lists three modules";

fn fixture_provider() -> Arc<FixtureEmbeddings> {
    Arc::new(FixtureEmbeddings::new(&[
        (QUESTION, vec![1.0, 0.0, 0.0]),
        (CHUNK_ROUTER, vec![0.9, 0.1, 0.0]),
        (CHUNK_WEATHER, vec![0.0, 1.0, 0.0]),
        (CHUNK_INVENTORY, vec![0.8, 0.2, 0.0]),
    ]))
}

fn fixture_corpus() -> Corpus {
    BTreeMap::from([
        (0, vec![CHUNK_ROUTER.to_string(), CHUNK_WEATHER.to_string()]),
        (1, vec![CHUNK_INVENTORY.to_string()]),
    ])
}

fn pipeline_with(
    provider: Arc<FixtureEmbeddings>,
    generator: Arc<dyn AnswerGenerator>,
    threshold: f32,
) -> RagPipeline {
    let config = RagConfig::builder()
        .similarity_threshold(threshold)
        .stream_delay(std::time::Duration::ZERO)
        .build()
        .unwrap();
    RagPipeline::builder()
        .config(config)
        .embedding_provider(provider)
        .answer_generator(generator)
        .build()
        .unwrap()
}

async fn drain(
    pipeline: &RagPipeline,
    question: &str,
    collection: &IndexedCollection,
) -> Vec<String> {
    pipeline.response_generator(question, collection).await.unwrap().collect().await
}

// ── Indexing ───────────────────────────────────────────────────────

#[tokio::test]
async fn compute_embeddings_orders_by_segment_then_position() {
    let pipeline =
        pipeline_with(fixture_provider(), Arc::new(CannedGenerator("unused")), 0.3);
    let collection = pipeline.compute_embeddings(&fixture_corpus()).await.unwrap();

    let keys: Vec<(u32, u32)> =
        collection.records().iter().map(|r| (r.segment, r.position)).collect();
    assert_eq!(keys, vec![(0, 0), (0, 1), (1, 0)]);
    assert!(collection.records().iter().all(|r| r.source == SourceKind::Pdf));
}

#[tokio::test]
async fn unembeddable_chunks_are_omitted_deterministically() {
    let provider = Arc::new(FixtureEmbeddings::new(&[
        ("first", vec![1.0, 0.0, 0.0]),
        ("", Vec::new()),
        ("third", vec![0.0, 1.0, 0.0]),
    ]));
    let pipeline = pipeline_with(provider, Arc::new(CannedGenerator("unused")), 0.3);
    let corpus: Corpus =
        BTreeMap::from([(7, vec!["first".to_string(), String::new(), "third".to_string()])]);

    let first = pipeline.compute_embeddings(&corpus).await.unwrap();
    let second = pipeline.compute_embeddings(&corpus).await.unwrap();

    // The empty chunk is dropped, the survivors keep their positions.
    let keys: Vec<(u32, u32)> = first.records().iter().map(|r| (r.segment, r.position)).collect();
    assert_eq!(keys, vec![(7, 0), (7, 2)]);
    assert_eq!(first, second);
}

#[tokio::test]
async fn embedding_failure_propagates_from_indexing() {
    let provider = Arc::new(FixtureEmbeddings::new(&[]));
    let pipeline = pipeline_with(provider, Arc::new(CannedGenerator("unused")), 0.3);
    let corpus: Corpus = BTreeMap::from([(0, vec!["never registered".to_string()])]);

    let err = pipeline.compute_embeddings(&corpus).await.unwrap_err();
    assert!(matches!(err, RagError::Embedding { .. }));
}

// ── Querying ───────────────────────────────────────────────────────

#[tokio::test]
async fn response_is_deterministic_across_runs() {
    let pipeline =
        pipeline_with(fixture_provider(), Arc::new(CannedGenerator("All modules are in stock.")), 0.3);
    let collection = pipeline.compute_embeddings(&fixture_corpus()).await.unwrap();

    let first = drain(&pipeline, QUESTION, &collection).await;
    let second = drain(&pipeline, QUESTION, &collection).await;
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[tokio::test]
async fn narrative_answer_streams_body_and_citations() {
    let pipeline =
        pipeline_with(fixture_provider(), Arc::new(CannedGenerator("All modules are in stock.")), 0.3);
    let collection = pipeline.compute_embeddings(&fixture_corpus()).await.unwrap();

    let chunks = drain(&pipeline, QUESTION, &collection).await;

    // Every chunk is one word with a single trailing space, and the
    // rejoined text matches the composed answer modulo whitespace.
    assert!(chunks.iter().all(|c| c.ends_with(' ') && !c.trim().contains(' ')));
    let rejoined = chunks.concat();
    let expected = "All modules are in stock.\n\nSources:\n\
                    - PDF, Page 0: Sections 0\n- PDF, Page 1: Sections 0\n";
    assert_eq!(
        rejoined.split_whitespace().collect::<Vec<_>>(),
        expected.split_whitespace().collect::<Vec<_>>(),
    );
}

#[tokio::test]
async fn candidates_at_the_threshold_are_excluded() {
    // With threshold 0.0, the weather chunk scores exactly 0.0 against
    // the query and must drop; both module chunks score above and stay.
    let pipeline =
        pipeline_with(fixture_provider(), Arc::new(CannedGenerator("answer")), 0.0);
    let collection = pipeline.compute_embeddings(&fixture_corpus()).await.unwrap();

    let rejoined = drain(&pipeline, QUESTION, &collection).await.concat();
    assert!(rejoined.contains("Page 0: Sections 0"));
    assert!(rejoined.contains("Page 1: Sections 0"));
    assert!(!rejoined.contains("Sections 1"), "orthogonal chunk must not be cited");
}

#[tokio::test]
async fn empty_retrieval_streams_the_sentinel_without_citations() {
    // Threshold 1.0 is above every similarity, so nothing survives.
    let pipeline =
        pipeline_with(fixture_provider(), Arc::new(CannedGenerator("unused")), 1.0);
    let collection = pipeline.compute_embeddings(&fixture_corpus()).await.unwrap();

    let rejoined = drain(&pipeline, QUESTION, &collection).await.concat();
    assert_eq!(
        rejoined.split_whitespace().collect::<Vec<_>>(),
        NO_CONTEXT_ANSWER.split_whitespace().collect::<Vec<_>>(),
    );
    assert!(!rejoined.contains("Sources:"));
}

#[tokio::test]
async fn tabular_source_selects_the_listing_branch() {
    let pipeline =
        pipeline_with(fixture_provider(), Arc::new(CannedGenerator("must not be used")), 0.3);
    let collection =
        pipeline.compute_embeddings(&fixture_corpus()).await.unwrap().with_source(SourceKind::Csv);

    let rejoined = drain(&pipeline, QUESTION, &collection).await.concat();
    assert!(rejoined.contains("Relevant data found:"));
    assert!(rejoined.contains(CHUNK_ROUTER));
    assert!(rejoined.contains("CSV, Page 0:"));
    assert!(!rejoined.contains("must not be used"));
}

#[tokio::test]
async fn generation_failure_propagates_before_streaming() {
    let pipeline = pipeline_with(fixture_provider(), Arc::new(FailingGenerator), 0.3);
    let collection = pipeline.compute_embeddings(&fixture_corpus()).await.unwrap();

    let err = match pipeline.response_generator(QUESTION, &collection).await {
        Ok(_) => panic!("expected response_generator to return an error"),
        Err(e) => e,
    };
    assert!(matches!(err, RagError::Generation { .. }));
}

#[tokio::test]
async fn zero_norm_query_embedding_is_not_an_error() {
    let provider = Arc::new(FixtureEmbeddings::new(&[
        ("degenerate question", vec![0.0, 0.0, 0.0]),
        (CHUNK_ROUTER, vec![0.9, 0.1, 0.0]),
    ]));
    let pipeline = pipeline_with(provider, Arc::new(CannedGenerator("unused")), 0.3);
    let corpus: Corpus = BTreeMap::from([(0, vec![CHUNK_ROUTER.to_string()])]);
    let collection = pipeline.compute_embeddings(&corpus).await.unwrap();

    // Every similarity is defined as 0.0, so the sentinel path runs.
    let rejoined = drain(&pipeline, "degenerate question", &collection).await.concat();
    assert!(rejoined.starts_with("No relevant information"));
}

// ── Composer wire format ───────────────────────────────────────────

fn pdf_candidate(segment: u32, position: u32, text: &str) -> RankedCandidate {
    RankedCandidate {
        record: IndexedRecord {
            segment,
            position,
            embedding: vec![1.0, 0.0, 0.0],
            text: text.to_string(),
            source: SourceKind::Pdf,
        },
        similarity: 0.9,
    }
}

#[tokio::test]
async fn citation_block_matches_the_wire_contract() {
    let composer = AnswerComposer::new(Arc::new(CannedGenerator("Generated answer.")));
    let candidates = vec![
        pdf_candidate(3, 0, "intro paragraph"),
        pdf_candidate(3, 2, "details paragraph"),
    ];

    let answer = composer.compose("q", &candidates).await.unwrap();
    assert_eq!(answer, "Generated answer.\n\nSources:\n- PDF, Page 3: Sections 0, 2\n");
}

#[tokio::test]
async fn listing_answer_enumerates_candidates_in_ranked_order() {
    let composer = AnswerComposer::new(Arc::new(CannedGenerator("must not be used")));
    let mut excel = pdf_candidate(4, 1, "RBS-001, Bogotá, active");
    excel.record.source = SourceKind::Excel;
    let candidates = vec![excel, pdf_candidate(2, 0, "maintenance window notes")];

    let answer = composer.compose("q", &candidates).await.unwrap();
    assert_eq!(
        answer,
        "Relevant data found:\n\
         - RBS-001, Bogotá, active\n\
         - maintenance window notes\n\
         \n\nSources:\n\
         - Excel, Page 4: Sections 1\n\
         - PDF, Page 2: Sections 0\n"
    );
}

// ── Document-level indexing through the store ──────────────────────

#[tokio::test]
async fn index_document_reuses_the_stored_collection() {
    let provider = fixture_provider();
    let store = Arc::new(InMemoryCollectionStore::new());
    let config = RagConfig::builder()
        .similarity_threshold(0.3)
        .stream_delay(std::time::Duration::ZERO)
        .build()
        .unwrap();
    let pipeline = RagPipeline::builder()
        .config(config)
        .embedding_provider(Arc::clone(&provider) as Arc<dyn EmbeddingProvider>)
        .answer_generator(Arc::new(CannedGenerator("unused")))
        .collection_store(store)
        .build()
        .unwrap();

    let corpus = fixture_corpus();
    let first = pipeline.index_document("manual.pdf", &corpus).await.unwrap();
    let calls_after_first = provider.embed_calls();

    // Same filename: the stored collection is returned without touching
    // the provider, even for a different corpus (filename-only keying).
    let second = pipeline.index_document("manual.pdf", &corpus).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(provider.embed_calls(), calls_after_first);
}

#[tokio::test]
async fn index_document_without_a_store_is_a_config_error() {
    let pipeline =
        pipeline_with(fixture_provider(), Arc::new(CannedGenerator("unused")), 0.3);
    let err = pipeline.index_document("manual.pdf", &fixture_corpus()).await.unwrap_err();
    assert!(matches!(err, RagError::Config(_)));
}
