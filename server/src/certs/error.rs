//! Certificate Trust Errors

use thiserror::Error;

/// Reasons a signing certificate was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CertError {
    /// URL is not under the trusted signing bucket.
    #[error("Invalid certificate location: {0}")]
    InvalidLocation(String),

    /// Transport error, timeout or non-200 response. Safe to retry later.
    #[error("Certificate download failed: {0}")]
    DownloadFailed(String),

    /// Certificate is unparsable, outside its validity window, or issued
    /// to the wrong subject.
    #[error("Certificate expired or untrusted: {0}")]
    ExpiredOrUntrusted(String),
}
