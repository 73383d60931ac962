//! X.509 Certificate Parsing
//!
//! Decodes the signing certificate from a PEM chain document. The first
//! certificate in the document is the one the request was signed with;
//! anything after it is intermediate material and is ignored.

use chrono::{DateTime, Utc};
use rsa::pkcs8::DecodePublicKey;
use rsa::RsaPublicKey;
use x509_parser::pem::Pem;

use crate::error::{CryptoError, Result};

/// The parts of a signing certificate the trust checks care about.
#[derive(Debug, Clone)]
pub struct ParsedCertificate {
    /// Subject common name, if the subject carries one.
    pub common_name: Option<String>,
    /// Start of the validity window.
    pub not_before: DateTime<Utc>,
    /// End of the validity window.
    pub not_after: DateTime<Utc>,
    /// RSA public key from the subject public key info.
    pub public_key: RsaPublicKey,
}

impl ParsedCertificate {
    /// Parse the leading certificate of a PEM document.
    pub fn from_pem(document: &[u8]) -> Result<Self> {
        let pem = Pem::iter_from_buffer(document)
            .next()
            .ok_or(CryptoError::MissingCertificate)?
            .map_err(|e| CryptoError::Pem(e.to_string()))?;

        let cert = pem
            .parse_x509()
            .map_err(|e| CryptoError::X509(e.to_string()))?;

        let common_name = cert
            .subject()
            .iter_common_name()
            .next()
            .and_then(|cn| cn.as_str().ok())
            .map(str::to_owned);

        let validity = cert.validity();
        let not_before = utc_from_timestamp(validity.not_before.timestamp())?;
        let not_after = utc_from_timestamp(validity.not_after.timestamp())?;

        let public_key = RsaPublicKey::from_public_key_der(cert.public_key().raw)
            .map_err(|e| CryptoError::UnsupportedKey(e.to_string()))?;

        Ok(Self {
            common_name,
            not_before,
            not_after,
            public_key,
        })
    }

    /// Whether the certificate's validity window has closed at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.not_after
    }

    /// Whether `now` falls inside the validity window.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.not_before <= now && !self.is_expired_at(now)
    }
}

fn utc_from_timestamp(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| CryptoError::X509(format!("validity timestamp out of range: {secs}")))
}
