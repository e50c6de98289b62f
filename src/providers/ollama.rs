//! Ollama clients for embeddings and streamed generation

use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;

use crate::config::{EmbeddingConfig, GenerationConfig};
use crate::error::{Error, Result};

use super::embedding::EmbeddingProvider;
use super::llm::GenerationProvider;

#[derive(Serialize)]
struct EmbedRequest {
    model: String,
    prompt: String,
}

#[derive(Deserialize)]
struct EmbedResponse {
    // Absent or null counts as a zero-length vector
    embedding: Option<Vec<f32>>,
}

#[derive(Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    max_tokens: u32,
    temperature: f32,
    stream: bool,
}

/// One unit of a streamed generation response
#[derive(Debug, Clone, Deserialize)]
pub struct StreamFragment {
    /// Fragment text
    #[serde(default)]
    pub response: String,
    /// Terminal-fragment marker; consumption stops at the first `true`
    #[serde(default)]
    pub done: bool,
}

/// Ollama embedding client.
///
/// One outbound request per call, no retry; a failure propagates immediately.
pub struct OllamaEmbedder {
    client: Client,
    config: EmbeddingConfig,
}

impl OllamaEmbedder {
    /// Create a new embedder
    pub fn new(config: &EmbeddingConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.trim().is_empty() {
            return Err(Error::validation("text for embedding must not be empty"));
        }

        let url = format!("{}/api/embeddings", self.config.base_url);
        let request = EmbedRequest {
            model: self.config.model.clone(),
            prompt: text.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::upstream(format!("embedding request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::upstream(format!(
                "embedding request failed: HTTP {}",
                response.status()
            )));
        }

        let body: EmbedResponse = response
            .json()
            .await
            .map_err(|e| Error::upstream(format!("failed to parse embedding response: {}", e)))?;

        let embedding = body.embedding.unwrap_or_default();
        if embedding.len() != self.config.dimensions {
            return Err(Error::InvalidEmbedding {
                expected: self.config.dimensions,
                actual: embedding.len(),
            });
        }

        tracing::debug!(
            "Embedded text ({} chars) into {} dimensions",
            text.len(),
            embedding.len()
        );
        Ok(embedding)
    }

    fn dimensions(&self) -> usize {
        self.config.dimensions
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/api/tags", self.config.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

/// Ollama generation client consuming the streamed NDJSON response.
///
/// Fragments are aggregated in arrival order until the first terminal one;
/// the whole wait is bounded by the configured stream timeout.
pub struct OllamaGenerator {
    client: Client,
    config: GenerationConfig,
}

impl OllamaGenerator {
    /// Create a new generator
    pub fn new(config: &GenerationConfig) -> Self {
        // No overall request timeout here: it would cap the stream itself.
        // The stream wait is bounded in generate() instead.
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            config: config.clone(),
        }
    }

    async fn collect_fragments(response: reqwest::Response) -> Result<String> {
        let mut stream = response.bytes_stream();
        let mut buffer = String::new();
        let mut answer = String::new();

        while let Some(chunk) = stream.next().await {
            let bytes =
                chunk.map_err(|e| Error::upstream(format!("generation stream error: {}", e)))?;
            buffer.push_str(&String::from_utf8_lossy(&bytes));

            // NDJSON lines can arrive split across transport chunks; only
            // complete lines are parsed.
            while let Some(pos) = buffer.find('\n') {
                let line: String = buffer.drain(..=pos).collect();
                if Self::consume_line(line.trim(), &mut answer)? {
                    return Ok(answer);
                }
            }
        }

        if Self::consume_line(buffer.trim(), &mut answer)? {
            return Ok(answer);
        }

        Err(Error::upstream(
            "generation stream ended before the terminal fragment",
        ))
    }

    /// Parse one NDJSON line into the running answer; true means terminal.
    fn consume_line(line: &str, answer: &mut String) -> Result<bool> {
        if line.is_empty() {
            return Ok(false);
        }
        let fragment: StreamFragment = serde_json::from_str(line)
            .map_err(|e| Error::upstream(format!("malformed stream fragment: {}", e)))?;
        answer.push_str(&fragment.response);
        Ok(fragment.done)
    }
}

#[async_trait]
impl GenerationProvider for OllamaGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.config.base_url);
        let request = GenerateRequest {
            model: self.config.model.clone(),
            prompt: prompt.to_string(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            stream: true,
        };

        tracing::info!("Generating answer with model: {}", self.config.model);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::upstream(format!("generation request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::upstream(format!(
                "generation request failed: HTTP {} - {}",
                status, body
            )));
        }

        let wait = Duration::from_secs(self.config.stream_timeout_secs);
        let answer = timeout(wait, Self::collect_fragments(response))
            .await
            .map_err(|_| {
                Error::upstream(format!(
                    "generation stream exceeded {}s",
                    self.config.stream_timeout_secs
                ))
            })??;

        tracing::debug!("Aggregated answer: {} chars", answer.len());
        Ok(answer)
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/api/tags", self.config.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragments_aggregate_in_order() {
        let mut answer = String::new();
        assert!(!OllamaGenerator::consume_line(
            r#"{"response":"Part1","done":false}"#,
            &mut answer
        )
        .unwrap());
        assert!(OllamaGenerator::consume_line(
            r#"{"response":"Part2","done":true}"#,
            &mut answer
        )
        .unwrap());
        assert_eq!(answer, "Part1Part2");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let mut answer = String::new();
        assert!(!OllamaGenerator::consume_line("", &mut answer).unwrap());
        assert!(answer.is_empty());
    }

    #[test]
    fn malformed_fragment_is_an_upstream_error() {
        let mut answer = String::new();
        let err = OllamaGenerator::consume_line("not json", &mut answer).unwrap_err();
        assert!(matches!(err, Error::Upstream(_)));
    }
}
