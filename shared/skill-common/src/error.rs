//! Common Error Types

use thiserror::Error;

/// Errors raised while decoding skill wire types.
#[derive(Debug, Error)]
pub enum CommonError {
    /// Body is not JSON or does not have the envelope shape.
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
}

impl From<serde_json::Error> for CommonError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedBody(err.to_string())
    }
}

/// Result type for common operations.
pub type Result<T> = std::result::Result<T, CommonError>;
