//! API routes for the RAG server

pub mod ask;
pub mod ingest;

use axum::{
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ingest", post(ingest::ingest_document))
        .route("/ask", post(ask::ask_question))
        .route("/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "chroma-rag",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "RAG pipeline over ChromaDB and Ollama",
        "endpoints": {
            "POST /api/ingest": "Store extracted document text",
            "POST /api/ask": "Ask a question against the ingested corpus",
            "GET /health": "Liveness check",
            "GET /ready": "Readiness check"
        }
    }))
}
