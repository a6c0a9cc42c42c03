//! Session lifecycle HTTP handlers.
//!
//! Endpoints:
//! - POST   /api/v1/sessions               - Create a session
//! - GET    /api/v1/sessions/{id}          - Get a session summary
//! - GET    /api/v1/sessions/{id}/messages - Get the transcript in order
//! - DELETE /api/v1/sessions/{id}          - Drop the session

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use wellspring_types::chat::ChatMessage;
use wellspring_types::profile::{Profile, ProfileForm};

use crate::http::error::AppError;
use crate::http::handlers::parse_uuid;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for session creation.
#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    /// Optional initial profile from the sidebar form.
    pub profile: Option<ProfileForm>,
}

/// Session summary returned by create/get.
#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub message_count: usize,
    pub profile_saved: bool,
}

/// POST /api/v1/sessions - Create a session.
pub async fn create_session(
    State(state): State<AppState>,
    body: Option<Json<CreateSessionRequest>>,
) -> Result<Json<ApiResponse<SessionSummary>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let (id, shared) = state.create_session();
    let mut session = shared.lock().await;

    if let Some(Json(body)) = body {
        if let Some(form) = body.profile {
            let profile = Profile::from_form(&form);
            if !profile.is_empty() {
                session.profile = Some(profile);
            }
        }
    }

    tracing::info!(session = %id, "session created");

    let summary = SessionSummary {
        id: session.id,
        started_at: session.started_at,
        message_count: session.transcript.len(),
        profile_saved: session.profile.is_some(),
    };

    Ok(Json(ApiResponse::success(
        summary,
        request_id,
        start.elapsed().as_millis() as u64,
    )))
}

/// GET /api/v1/sessions/{id} - Get a session summary.
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<SessionSummary>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    let shared = state.session(&sid).ok_or(AppError::SessionNotFound)?;
    let session = shared.lock().await;

    let summary = SessionSummary {
        id: session.id,
        started_at: session.started_at,
        message_count: session.transcript.len(),
        profile_saved: session.profile.is_some(),
    };

    Ok(Json(ApiResponse::success(
        summary,
        request_id,
        start.elapsed().as_millis() as u64,
    )))
}

/// GET /api/v1/sessions/{id}/messages - Get the transcript in display order.
pub async fn get_messages(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<ChatMessage>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    let shared = state.session(&sid).ok_or(AppError::SessionNotFound)?;
    let session = shared.lock().await;

    let messages = session.transcript.messages().to_vec();

    Ok(Json(ApiResponse::success(
        messages,
        request_id,
        start.elapsed().as_millis() as u64,
    )))
}

/// DELETE /api/v1/sessions/{id} - Drop the session and its transcript.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    state
        .sessions
        .remove(&sid)
        .ok_or(AppError::SessionNotFound)?;

    tracing::info!(session = %sid, "session deleted");

    Ok(Json(ApiResponse::success(
        serde_json::json!({"deleted": true}),
        request_id,
        start.elapsed().as_millis() as u64,
    )))
}
