//! # OpenAI Bot Demo
//!
//! The same pipeline wired to the real OpenAI collaborators. Requires
//! `OPENAI_API_KEY` in the environment.
//!
//! Run: `cargo run --example openai_bot --features openai`

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use ragcite::openai::{OpenAIAnswerGenerator, OpenAIEmbeddingProvider};
use ragcite::{Corpus, RagConfig, RagPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let embedder = OpenAIEmbeddingProvider::from_env()?
        .with_dimensions(256)
        .with_timeout(Duration::from_secs(20));
    let generator = OpenAIAnswerGenerator::from_env()?.with_timeout(Duration::from_secs(60));

    let pipeline = RagPipeline::builder()
        .config(RagConfig::default())
        .embedding_provider(Arc::new(embedder))
        .answer_generator(Arc::new(generator))
        .build()?;

    let corpus: Corpus = BTreeMap::from([
        (
            0,
            vec![
                "The support desk is reachable Monday to Friday, 8am to 6pm.".to_string(),
                "Premium customers have a four-hour response SLA.".to_string(),
            ],
        ),
        (1, vec!["Hardware replacements ship from the Bogota warehouse.".to_string()]),
    ]);

    let collection = pipeline.compute_embeddings(&corpus).await?;
    println!("Indexed {} records", collection.len());

    let question = "How fast do premium customers get a response?";
    println!("\nQ: {question}\nA: ");
    let mut stream = pipeline.response_generator(question, &collection).await?;
    while let Some(chunk) = stream.next().await {
        print!("{chunk}");
        std::io::stdout().flush()?;
    }
    println!();

    Ok(())
}
