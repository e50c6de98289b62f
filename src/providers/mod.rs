//! Provider abstractions for embeddings, generation, and vector storage

pub mod chroma;
pub mod embedding;
pub mod llm;
pub mod ollama;

pub use chroma::{ChromaStore, CollectionHandle};
pub use embedding::EmbeddingProvider;
pub use llm::GenerationProvider;
