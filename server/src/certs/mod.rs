//! Signing Certificate Trust
//!
//! Resolves the certificate named by a request's `SignatureCertChainUrl`
//! header, accepting it only if both its location and its contents satisfy
//! the platform's trust constraints. Accepted certificates are cached until
//! they expire.

pub mod cache;
pub mod error;
pub mod fetch;
pub mod location;
pub mod record;
pub mod validator;

pub use cache::CertificateCache;
pub use error::CertError;
pub use fetch::{CertificateFetcher, HttpCertificateFetcher};
pub use record::CertificateRecord;
pub use validator::{CertificateValidator, TRUSTED_COMMON_NAME};
