//! Ingestion pipeline: chunk, embed, and store a document

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::{ChromaStore, EmbeddingProvider};
use crate::types::Chunk;

use super::chunker::WordChunker;

/// Orchestrates ingestion of one document's extracted text.
///
/// Chunks are embedded and upserted sequentially in document order; the
/// first failure aborts the remaining chunks. Already-stored chunks are not
/// rolled back.
pub struct IngestPipeline {
    chunker: WordChunker,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<ChromaStore>,
}

impl IngestPipeline {
    /// Create a new pipeline
    pub fn new(
        chunker: WordChunker,
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<ChromaStore>,
    ) -> Self {
        Self {
            chunker,
            embedder,
            store,
        }
    }

    /// Ingest one document, returning the number of chunks stored
    pub async fn ingest(&self, text: &str) -> Result<usize> {
        if text.trim().is_empty() {
            return Err(Error::validation("document text must not be empty"));
        }

        let chunks = self.chunker.chunk(text);
        tracing::info!("Ingesting document as {} chunks", chunks.len());

        let mut stored = 0usize;
        for text in chunks {
            let chunk = Chunk::from_upload(text);
            let embedding = self.embedder.embed(&chunk.text).await?;
            self.store.upsert(&chunk, &embedding).await?;
            stored += 1;
        }

        tracing::info!("Ingestion complete: {} chunks stored", stored);
        Ok(stored)
    }
}
