//! Error types for the RAG pipeline

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for RAG operations
pub type Result<T> = std::result::Result<T, Error>;

/// RAG pipeline errors
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input: blank document text, blank embedding input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Upstream embedding model returned a vector of the wrong length
    #[error("Embedding has {actual} dimensions, expected {expected}")]
    InvalidEmbedding { expected: usize, actual: usize },

    /// Operation attempted before the collection was resolved
    #[error("State error: {0}")]
    State(String),

    /// Transport or HTTP failure talking to the vector store, embedding
    /// model, or generation model
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Vector store reports the collection absent. Consumed internally by
    /// collection resolution; never user-facing.
    #[error("Collection '{0}' does not exist")]
    CollectionMissing(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a state error
    pub fn state(message: impl Into<String>) -> Self {
        Self::State(message.into())
    }

    /// Create an upstream error
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            Error::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            Error::InvalidEmbedding { .. } => (StatusCode::BAD_GATEWAY, "invalid_embedding"),
            Error::State(_) => (StatusCode::INTERNAL_SERVER_ERROR, "state_error"),
            Error::Upstream(_) => (StatusCode::BAD_GATEWAY, "upstream_error"),
            // Internal signal; if it ever reaches the boundary something is wrong
            Error::CollectionMissing(_) => (StatusCode::INTERNAL_SERVER_ERROR, "collection_missing"),
            Error::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}
