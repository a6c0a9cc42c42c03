//! Profile HTTP handler.
//!
//! PUT /api/v1/sessions/{id}/profile
//!
//! Saves the sidebar profile form into the session. The profile is sent to
//! the agent on subsequent turns when profile transmission is enabled.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use uuid::Uuid;

use wellspring_types::profile::{Profile, ProfileForm};

use crate::http::error::AppError;
use crate::http::handlers::parse_uuid;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Saved profile as echoed back to the client.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: Profile,
    /// Whether the server transmits profiles to the agent at all.
    pub transmitted: bool,
}

/// PUT /api/v1/sessions/{id}/profile - Save the profile for this session.
pub async fn save_profile(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(form): Json<ProfileForm>,
) -> Result<Json<ApiResponse<ProfileResponse>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    let shared = state.session(&sid).ok_or(AppError::SessionNotFound)?;

    let profile = Profile::from_form(&form);
    if profile.is_empty() {
        return Err(AppError::Validation(
            "profile form has no usable fields".to_string(),
        ));
    }

    let mut session = shared.lock().await;
    session.profile = Some(profile.clone());
    tracing::info!(session = %sid, "profile saved");

    Ok(Json(ApiResponse::success(
        ProfileResponse {
            profile,
            transmitted: state.settings.send_profile,
        },
        request_id,
        start.elapsed().as_millis() as u64,
    )))
}
