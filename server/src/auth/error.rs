//! Request Authentication Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use skill_common::CommonError;
use thiserror::Error;

use super::timestamp::TimestampError;
use crate::certs::CertError;

/// Why an inbound request was not accepted as authentic.
///
/// Every variant is terminal for the request; nothing is retried inside the
/// authenticator.
#[derive(Debug, Error)]
pub enum AuthFailure {
    /// A required signature header is absent or not valid UTF-8.
    #[error("Missing request header: {0}")]
    MissingHeader(&'static str),

    /// Cert chain URL is outside the trusted location.
    #[error("Invalid certificate location: {0}")]
    InvalidCertLocation(String),

    /// Certificate could not be downloaded.
    #[error("Certificate download failed: {0}")]
    CertDownloadFailed(String),

    /// Certificate is expired or issued to the wrong subject.
    #[error("Certificate expired or untrusted: {0}")]
    CertExpiredOrUntrusted(String),

    /// Signature does not verify over the raw body.
    #[error("Request signature does not match")]
    SignatureMismatch,

    /// Body declares no usable timestamp.
    #[error("Request timestamp missing or malformed")]
    TimestampMissing,

    /// Declared timestamp is too far from the server clock.
    #[error("Request timestamp is {skew_secs}s from server time")]
    TimestampSkewExceeded {
        /// Absolute difference, in whole seconds.
        skew_secs: i64,
    },

    /// Body is not a JSON object.
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
}

impl AuthFailure {
    /// Machine-readable code for the response body and logs.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingHeader(_) => "MISSING_HEADER",
            Self::InvalidCertLocation(_) => "INVALID_CERT_LOCATION",
            Self::CertDownloadFailed(_) => "CERT_DOWNLOAD_FAILED",
            Self::CertExpiredOrUntrusted(_) => "CERT_UNTRUSTED",
            Self::SignatureMismatch => "SIGNATURE_MISMATCH",
            Self::TimestampMissing => "TIMESTAMP_MISSING",
            Self::TimestampSkewExceeded { .. } => "TIMESTAMP_SKEW",
            Self::MalformedBody(_) => "MALFORMED_BODY",
        }
    }
}

impl From<CertError> for AuthFailure {
    fn from(err: CertError) -> Self {
        match err {
            CertError::InvalidLocation(e) => Self::InvalidCertLocation(e),
            CertError::DownloadFailed(e) => Self::CertDownloadFailed(e),
            CertError::ExpiredOrUntrusted(e) => Self::CertExpiredOrUntrusted(e),
        }
    }
}

impl From<TimestampError> for AuthFailure {
    fn from(err: TimestampError) -> Self {
        match err {
            TimestampError::Missing => Self::TimestampMissing,
            TimestampError::SkewExceeded { skew_secs } => Self::TimestampSkewExceeded { skew_secs },
        }
    }
}

impl From<CommonError> for AuthFailure {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::MalformedBody(e) => Self::MalformedBody(e),
        }
    }
}

/// Error response body for JSON responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable error message.
    pub message: String,
}

impl IntoResponse for AuthFailure {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
        });

        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

/// Result type for authentication.
pub type AuthResult<T> = Result<T, AuthFailure>;
