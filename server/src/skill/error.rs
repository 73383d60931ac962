//! Skill Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use skill_common::CommonError;
use thiserror::Error;

use crate::auth::ErrorResponse;

/// Dispatch failures. Programmer or configuration errors, never swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The request kind is none of launch, intent or session-ended.
    #[error("Unsupported request type: {0}")]
    UnknownRequestKind(String),
}

/// Rejected handler registration, raised while the skill is being built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("Invalid intent name: {0:?}")]
    InvalidIntentName(String),
}

/// Failure handling a request body end to end.
#[derive(Debug, Error)]
pub enum SkillError {
    #[error(transparent)]
    Parse(#[from] CommonError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl SkillError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "MALFORMED_BODY",
            Self::Dispatch(DispatchError::UnknownRequestKind(_)) => "UNKNOWN_REQUEST_KIND",
        }
    }
}

impl IntoResponse for SkillError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
        });

        (StatusCode::BAD_REQUEST, body).into_response()
    }
}
