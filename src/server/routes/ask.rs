//! Question answering endpoint

use std::time::Instant;

use axum::{extract::State, Json};

use crate::server::state::AppState;
use crate::types::{AskRequest, AskResponse};

/// POST /api/ask - Answer a question against the ingested corpus.
///
/// Always returns 200 with a string answer: the query service renders every
/// outcome, including failures, to a user-facing message.
pub async fn ask_question(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Json<AskResponse> {
    let start = Instant::now();
    tracing::info!("Question: \"{}\"", request.question);

    let outcome = state.query_service().answer(&request.question).await;

    tracing::info!("Question handled in {}ms", start.elapsed().as_millis());

    Json(AskResponse {
        answer: outcome.into_message(),
    })
}
