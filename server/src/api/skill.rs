//! Skill Endpoint

use axum::{body::Bytes, extract::State, Json};
use skill_common::ResponseEnvelope;
use tracing::{instrument, warn};

use super::AppState;
use crate::skill::SkillError;

/// Decode a skill request and return the handler's response.
///
/// Authentication, when enabled, has already run in middleware by the time
/// the body reaches this handler.
#[instrument(skip(state, body), fields(body_len = body.len()))]
pub async fn skill_endpoint(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ResponseEnvelope>, SkillError> {
    let response = state
        .skill
        .handle(&body)
        .await
        .inspect_err(|e| warn!(reason = e.code(), error = %e, "Rejected skill request"))?;
    Ok(Json(response))
}
