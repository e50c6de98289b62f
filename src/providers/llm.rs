//! Generation provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for LLM answer generation
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Send a prompt and return the full aggregated response.
    ///
    /// Implementations consuming a streamed response must preserve fragment
    /// order, drop nothing, and return only once the terminal fragment
    /// arrives, or fail with an upstream error. No partial results.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Check if the provider is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// The model being used
    fn model(&self) -> &str;
}
