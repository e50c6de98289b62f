//! Document ingestion endpoint

use std::time::Instant;

use axum::{extract::State, Json};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{IngestRequest, IngestResponse};

/// POST /api/ingest - Store one document's extracted text
pub async fn ingest_document(
    State(state): State<AppState>,
    Json(request): Json<IngestRequest>,
) -> Result<Json<IngestResponse>> {
    let start = Instant::now();

    let chunks_stored = state.ingest_pipeline().ingest(&request.text).await?;

    tracing::info!(
        "Ingestion completed in {}ms, {} chunks",
        start.elapsed().as_millis(),
        chunks_stored
    );

    Ok(Json(IngestResponse {
        message: "Document stored successfully.".to_string(),
        chunks_stored,
    }))
}
