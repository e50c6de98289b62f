//! RAG server binary
//!
//! Run with: cargo run --bin chroma-rag-server

use chroma_rag::{config::RagConfig, server::RagServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chroma_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration, from file when CHROMA_RAG_CONFIG is set
    let config = match std::env::var("CHROMA_RAG_CONFIG") {
        Ok(path) => RagConfig::from_file(&path)?,
        Err(_) => RagConfig::default(),
    };

    tracing::info!("Configuration loaded");
    tracing::info!("  - Vector store: {} (collection: {})", config.chroma.base_url, config.chroma.collection);
    tracing::info!("  - Embedding model: {} ({} dims)", config.embedding.model, config.embedding.dimensions);
    tracing::info!("  - Generation model: {}", config.generation.model);
    tracing::info!("  - Chunk size: {} words", config.chunking.max_words);

    // Probe Ollama; the server can still start, requests will fail upstream
    tracing::info!("Checking Ollama at {}...", config.embedding.base_url);
    let client = reqwest::Client::new();
    match client
        .get(format!("{}/api/tags", config.embedding.base_url))
        .send()
        .await
    {
        Ok(resp) if resp.status().is_success() => {
            tracing::info!("Ollama is running");
        }
        _ => {
            tracing::warn!("Ollama not available at {}", config.embedding.base_url);
            tracing::warn!("Start it with: ollama serve");
            tracing::warn!(
                "Then pull the models: ollama pull {} && ollama pull {}",
                config.embedding.model,
                config.generation.model
            );
        }
    }

    // Resolving the collection is mandatory; abort on failure
    let server = RagServer::new(config).await?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/ingest - Store extracted document text");
    println!("  POST /api/ask    - Ask a question");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
