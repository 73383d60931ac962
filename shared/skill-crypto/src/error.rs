//! Cryptography Error Types

use thiserror::Error;

/// Errors raised while decoding certificate material.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The document holds no PEM block at all.
    #[error("No certificate found in PEM document")]
    MissingCertificate,

    /// PEM armor could not be decoded.
    #[error("Invalid PEM encoding: {0}")]
    Pem(String),

    /// DER payload is not a valid X.509 certificate.
    #[error("Invalid X.509 certificate: {0}")]
    X509(String),

    /// Subject public key is not an RSA key.
    #[error("Unsupported public key: {0}")]
    UnsupportedKey(String),
}

/// Result type for crypto operations.
pub type Result<T> = std::result::Result<T, CryptoError>;
