//! chroma-rag: RAG pipeline over ChromaDB and Ollama
//!
//! Ingests extracted document text, splits it into sentence-respecting
//! chunks, embeds each chunk, and persists the embeddings in a ChromaDB
//! collection. On query it embeds the question, retrieves the most relevant
//! chunks, assembles a grounded prompt, and aggregates a streamed generation
//! response into one answer.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use types::{document::Chunk, response::AnswerOutcome};
