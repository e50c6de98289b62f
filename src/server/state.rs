//! Application state for the RAG server

use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::RagConfig;
use crate::error::Result;
use crate::ingestion::{IngestPipeline, WordChunker};
use crate::providers::{
    ollama::{OllamaEmbedder, OllamaGenerator},
    ChromaStore, EmbeddingProvider, GenerationProvider,
};
use crate::retrieval::QueryService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: RagConfig,
    /// Vector store, shared by the ingest and query paths
    store: Arc<ChromaStore>,
    /// Ingestion pipeline
    ingest: IngestPipeline,
    /// Query service
    query: QueryService,
    /// Ready state; flips once the collection is resolved
    ready: RwLock<bool>,
}

impl AppState {
    /// Create new application state; the collection is resolved separately
    /// by [`initialize`](AppState::initialize)
    pub fn new(config: RagConfig) -> Self {
        tracing::info!("Initializing RAG application state...");

        let embedder: Arc<dyn EmbeddingProvider> =
            Arc::new(OllamaEmbedder::new(&config.embedding));
        tracing::info!(
            "Embedding client initialized (model: {}, {} dims)",
            config.embedding.model,
            config.embedding.dimensions
        );

        let generator: Arc<dyn GenerationProvider> =
            Arc::new(OllamaGenerator::new(&config.generation));
        tracing::info!("Generation client initialized (model: {})", config.generation.model);

        let store = Arc::new(ChromaStore::new(
            &config.chroma,
            config.embedding.dimensions,
        ));
        tracing::info!("Vector store client initialized (collection: {})", config.chroma.collection);

        let ingest = IngestPipeline::new(
            WordChunker::new(config.chunking.max_words),
            Arc::clone(&embedder),
            Arc::clone(&store),
        );

        let query = QueryService::new(
            embedder,
            Arc::clone(&store),
            generator,
            config.retrieval.top_k,
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                ingest,
                query,
                ready: RwLock::new(false),
            }),
        }
    }

    /// Resolve the collection; the server must not accept traffic before
    /// this succeeds
    pub async fn initialize(&self) -> Result<()> {
        let handle = self.inner.store.ensure_collection().await?;
        tracing::info!("Collection {} resolved (UUID {})", handle.name, handle.id);
        self.set_ready(true);
        Ok(())
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Get the ingestion pipeline
    pub fn ingest_pipeline(&self) -> &IngestPipeline {
        &self.inner.ingest
    }

    /// Get the query service
    pub fn query_service(&self) -> &QueryService {
        &self.inner.query
    }

    /// Check if the server is ready
    pub fn is_ready(&self) -> bool {
        *self.inner.ready.read()
    }

    /// Set ready state
    pub fn set_ready(&self, ready: bool) {
        *self.inner.ready.write() = ready;
    }
}
