//! # Support Bot Demo
//!
//! Indexes a small technical-support corpus, then answers questions with
//! streamed, cited output — once over PDF-style pages (narrative branch)
//! and once over spreadsheet rows (listing branch).
//!
//! Uses a deterministic `MockEmbeddingProvider` and a canned generator so
//! it runs with **zero API keys**.
//!
//! Run: `cargo run --example support_bot`

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use ragcite::{
    AnswerGenerator, Corpus, EmbeddingProvider, InMemoryCollectionStore, RagConfig, RagPipeline,
    SourceKind,
};

// ---------------------------------------------------------------------------
// MockEmbeddingProvider — deterministic hash-based embeddings for demos
// ---------------------------------------------------------------------------

struct MockEmbeddingProvider {
    dimensions: usize,
}

#[async_trait::async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, text: &str) -> ragcite::Result<Vec<f32>> {
        // Deterministic embedding: hash word tokens so texts sharing
        // vocabulary land near each other, then L2-normalise.
        let mut emb = vec![0.0f32; self.dimensions];
        for word in text.split_whitespace() {
            let hash = word
                .bytes()
                .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
            for (i, v) in emb.iter_mut().enumerate() {
                *v += ((hash.wrapping_add(i as u64)) as f32).sin();
            }
        }
        let norm: f32 = emb.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            emb.iter_mut().for_each(|x| *x /= norm);
        }
        Ok(emb)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

// ---------------------------------------------------------------------------
// CannedGenerator — stands in for the LLM on the narrative branch
// ---------------------------------------------------------------------------

struct CannedGenerator;

#[async_trait::async_trait]
impl AnswerGenerator for CannedGenerator {
    async fn generate(&self, question: &str, context: &str) -> ragcite::Result<String> {
        let lines = context.lines().count();
        Ok(format!("Based on {lines} retrieved passage(s): the answer to \"{question}\" \
                    is summarised from the manual excerpts above."))
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // -- 1. Build the pipeline --------------------------------------------
    // threshold 0.05 keeps loosely matching hash embeddings; 15ms delay
    // makes the streaming visible without dragging.
    let config = RagConfig::builder()
        .similarity_threshold(0.05)
        .stream_delay(Duration::from_millis(15))
        .build()?;

    let pipeline = RagPipeline::builder()
        .config(config)
        .embedding_provider(Arc::new(MockEmbeddingProvider { dimensions: 64 }))
        .answer_generator(Arc::new(CannedGenerator))
        .collection_store(Arc::new(InMemoryCollectionStore::new()))
        .build()?;

    // -- 2. Index a PDF-style manual (pages → paragraphs) ------------------
    let manual: Corpus = BTreeMap::from([
        (
            0,
            vec![
                "Router Cisco ASR-903 supports SFP-10G-LR in slots 1-4".to_string(),
                "Firmware upgrades require a maintenance window".to_string(),
            ],
        ),
        (1, vec!["Inventory shows 3 available SFP modules in Bogota".to_string()]),
    ]);
    let manual_collection = pipeline.index_document("router_manual.pdf", &manual).await?;
    println!("Indexed router_manual.pdf → {} records", manual_collection.len());

    // Asking again for the same filename reuses the stored collection.
    let _ = pipeline.index_document("router_manual.pdf", &manual).await?;

    // -- 3. Index a spreadsheet (rows) and mark it tabular -----------------
    let inventory: Corpus = BTreeMap::from([
        (0, vec!["RBS-001 Location: Bogota, SFP: SFP-10G-LR, Status: Active".to_string()]),
        (1, vec!["RBS-002 Location: Medellin, SFP: SFP-10G-SR, Status: Spare".to_string()]),
    ]);
    let inventory_collection =
        pipeline.compute_embeddings(&inventory).await?.with_source(SourceKind::Excel);
    println!("Indexed inventory.xlsx → {} records", inventory_collection.len());

    // -- 4. Ask questions and stream the answers ---------------------------
    let sessions = [
        ("Which SFP modules are available in Bogota?", &manual_collection),
        ("RBS SFP status", &inventory_collection),
        ("What is the cafeteria menu today?", &manual_collection),
    ];

    for (question, collection) in sessions {
        println!("\nQ: {question}\nA: ");
        let mut stream = pipeline.response_generator(question, collection).await?;
        while let Some(chunk) = stream.next().await {
            print!("{chunk}");
            std::io::stdout().flush()?;
        }
        println!();
    }

    Ok(())
}
