//! Skill Request Cryptography
//!
//! Certificate parsing and signature verification for inbound skill requests.
//!
//! - **Certificates**: PEM chain documents published at the signing cert URL
//! - **Signatures**: RSA PKCS#1 v1.5 over a SHA-1 digest of the raw request body

pub mod certificate;
pub mod error;
pub mod signature;

pub use certificate::ParsedCertificate;
pub use error::{CryptoError, Result};
pub use signature::{verify_signature, verify_signature_b64};

/// Re-export key types that callers need to hold a parsed certificate.
pub mod types {
    pub use rsa::RsaPublicKey;
}
