//! Query orchestration: embed, retrieve, prompt, generate

use std::sync::Arc;

use crate::error::Result;
use crate::generation::PromptBuilder;
use crate::providers::{ChromaStore, EmbeddingProvider, GenerationProvider};
use crate::types::AnswerOutcome;

/// Answers questions against the ingested corpus.
///
/// Every failure on the query path is converted into an [`AnswerOutcome`];
/// callers never observe a raw error.
pub struct QueryService {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<ChromaStore>,
    generator: Arc<dyn GenerationProvider>,
    top_k: usize,
}

impl QueryService {
    /// Create a new query service
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<ChromaStore>,
        generator: Arc<dyn GenerationProvider>,
        top_k: usize,
    ) -> Self {
        Self {
            embedder,
            store,
            generator,
            top_k,
        }
    }

    /// Answer a question.
    ///
    /// A blank question short-circuits before any embedding, retrieval, or
    /// generation call.
    pub async fn answer(&self, question: &str) -> AnswerOutcome {
        if question.trim().is_empty() {
            tracing::warn!("Received an empty question");
            return AnswerOutcome::EmptyQuestion;
        }

        match self.run(question).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Failed to answer question \"{}\": {}", question, e);
                AnswerOutcome::Failed(e.to_string())
            }
        }
    }

    async fn run(&self, question: &str) -> Result<AnswerOutcome> {
        let embedding = self.embedder.embed(question).await?;

        let context = self.store.query(&embedding, self.top_k).await?;
        if context.is_empty() {
            tracing::warn!("No relevant documents retrieved for question: {}", question);
        } else {
            tracing::debug!("Retrieved {} context chunks", context.len());
        }

        let prompt = PromptBuilder::build_rag_prompt(question, &context);
        tracing::debug!("Prompt sent to the generation model:\n{}", prompt);

        let answer = self.generator.generate(&prompt).await?;
        if answer.trim().is_empty() {
            tracing::info!("Generation model produced no answer for: {}", question);
            return Ok(AnswerOutcome::NoAnswer {
                question: question.to_string(),
            });
        }

        Ok(AnswerOutcome::Answered(answer))
    }
}
