//! Chat turn HTTP handler.
//!
//! POST /api/v1/sessions/{id}/messages
//!
//! Resolves one full turn before replying: append user message, token,
//! negotiation, extraction, append assistant message. Pipeline failures are
//! already rendered into the transcript by the conversation service, so the
//! handler only fails on unknown sessions and invalid input.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use wellspring_types::chat::ChatMessage;

use crate::http::error::AppError;
use crate::http::handlers::parse_uuid;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for a chat turn.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    /// The user message to send to the agent.
    pub message: String,
}

/// Result of one chat turn.
#[derive(Debug, Serialize)]
pub struct TurnResponse {
    /// The assistant message appended to the transcript.
    pub reply: ChatMessage,
    /// Whether the reply is an error placeholder.
    pub errored: bool,
    /// Whether the reply is the stringified-payload fallback.
    pub degraded: bool,
    /// Candidate payloads rejected before the turn resolved.
    pub failed_attempts: usize,
    /// Transcript length after the turn.
    pub message_count: usize,
}

/// POST /api/v1/sessions/{id}/messages - Resolve one chat turn.
pub async fn send_message(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<ApiResponse<TurnResponse>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    let shared = state.session(&sid).ok_or(AppError::SessionNotFound)?;

    // Hold the session lock for the whole turn: one turn at a time per
    // session, transcript appends never interleave.
    let mut session = shared.lock().await;
    let outcome = state.coach.handle_message(&mut session, &body.message).await?;

    let reply = session
        .transcript
        .last()
        .cloned()
        .ok_or_else(|| AppError::Internal("turn left transcript empty".to_string()))?;

    let response = TurnResponse {
        reply,
        errored: outcome.errored,
        degraded: outcome.is_degraded(),
        failed_attempts: outcome.failed_attempts,
        message_count: session.transcript.len(),
    };

    Ok(Json(ApiResponse::success(
        response,
        request_id,
        start.elapsed().as_millis() as u64,
    )))
}
