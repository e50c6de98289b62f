//! Embedding provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for generating text embeddings
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding for a single text.
    ///
    /// Fails with a validation error on blank input (before any network
    /// call) and with an invalid-embedding error when the upstream model
    /// returns a vector whose length differs from [`dimensions`].
    ///
    /// [`dimensions`]: EmbeddingProvider::dimensions
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Expected embedding dimensionality
    fn dimensions(&self) -> usize;

    /// Check if the provider is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
