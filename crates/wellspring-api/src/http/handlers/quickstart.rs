//! Quick-start prompt HTTP handler.
//!
//! GET /api/v1/sessions/{id}/quickstarts
//!
//! Returns the one-click starter messages for a fresh chat view, with the
//! daily-plan prompt personalized from the saved profile.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use wellspring_core::quickstart::sample_prompts;

use crate::http::error::AppError;
use crate::http::handlers::parse_uuid;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/sessions/{id}/quickstarts - Starter prompts for this session.
pub async fn get_quickstarts(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<String>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    let shared = state.session(&sid).ok_or(AppError::SessionNotFound)?;
    let session = shared.lock().await;

    let prompts = sample_prompts(session.profile.as_ref());

    Ok(Json(ApiResponse::success(
        prompts,
        request_id,
        start.elapsed().as_millis() as u64,
    )))
}
