//! Validated Certificate Records

use bytes::Bytes;
use chrono::{DateTime, Utc};
use skill_crypto::types::RsaPublicKey;
use skill_crypto::ParsedCertificate;

/// A certificate that passed location and content checks.
///
/// Records are immutable once built and shared behind `Arc`.
#[derive(Debug, Clone)]
pub struct CertificateRecord {
    /// URL the certificate was fetched from (the cache key).
    pub source_url: String,
    /// The PEM document as downloaded.
    pub pem: Bytes,
    /// Decoded leaf certificate.
    pub certificate: ParsedCertificate,
}

impl CertificateRecord {
    pub fn common_name(&self) -> Option<&str> {
        self.certificate.common_name.as_deref()
    }

    pub const fn not_after(&self) -> DateTime<Utc> {
        self.certificate.not_after
    }

    pub const fn public_key(&self) -> &RsaPublicKey {
        &self.certificate.public_key
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.certificate.is_expired_at(now)
    }
}
