//! Request Authenticator
//!
//! Combines the certificate, signature and timestamp checks into a single
//! accept/reject decision for an inbound skill request.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use skill_common::declared_timestamp;
use skill_crypto::verify_signature_b64;
use tracing::warn;

use super::error::{AuthFailure, AuthResult};
use super::timestamp::{check_timestamp, DEFAULT_TOLERANCE_SECS};
use crate::certs::{CertificateFetcher, CertificateValidator, HttpCertificateFetcher};
use crate::config::Config;

/// Header naming the URL of the signing certificate chain.
pub const CERT_CHAIN_URL_HEADER: &str = "SignatureCertChainUrl";

/// Header carrying the base64 request signature.
pub const SIGNATURE_HEADER: &str = "Signature";

/// Authenticates inbound requests. Cheap to clone; clones share the
/// certificate cache.
#[derive(Clone)]
pub struct RequestAuthenticator {
    validator: CertificateValidator,
    tolerance_secs: i64,
}

impl RequestAuthenticator {
    /// Create an authenticator with the default 150 second tolerance.
    pub fn new(validator: CertificateValidator) -> Self {
        Self {
            validator,
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
        }
    }

    /// Override the timestamp tolerance.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance_secs: i64) -> Self {
        self.tolerance_secs = tolerance_secs;
        self
    }

    /// Build the production authenticator: HTTPS fetcher with the
    /// configured timeout and tolerance.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let fetcher = HttpCertificateFetcher::new(Duration::from_secs(
            config.cert_fetch_timeout_secs,
        ))?;
        let fetcher: Arc<dyn CertificateFetcher> = Arc::new(fetcher);
        Ok(Self::new(CertificateValidator::new(fetcher)).with_tolerance(config.timestamp_tolerance_secs))
    }

    pub const fn validator(&self) -> &CertificateValidator {
        &self.validator
    }

    pub const fn tolerance_secs(&self) -> i64 {
        self.tolerance_secs
    }

    /// Authenticate a request from its headers and the body bytes exactly as
    /// received.
    pub async fn authenticate(&self, headers: &HeaderMap, body: &[u8]) -> AuthResult<()> {
        self.authenticate_at(headers, body, Utc::now()).await
    }

    /// [`Self::authenticate`] against an explicit clock.
    pub async fn authenticate_at(
        &self,
        headers: &HeaderMap,
        body: &[u8],
        now: DateTime<Utc>,
    ) -> AuthResult<()> {
        let result = self.check(headers, body, now).await;
        if let Err(e) = &result {
            warn!(reason = e.code(), error = %e, "Rejected skill request");
        }
        result
    }

    async fn check(&self, headers: &HeaderMap, body: &[u8], now: DateTime<Utc>) -> AuthResult<()> {
        // Both headers before any network or crypto work
        let cert_url = header_str(headers, CERT_CHAIN_URL_HEADER)?;
        let signature = header_str(headers, SIGNATURE_HEADER)?;

        let record = self.validator.validate_at(cert_url, now).await?;

        if !verify_signature_b64(record.public_key(), signature, body) {
            return Err(AuthFailure::SignatureMismatch);
        }

        let declared = declared_timestamp(body)?;
        check_timestamp(declared.as_deref(), now, self.tolerance_secs)?;

        Ok(())
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &'static str) -> AuthResult<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthFailure::MissingHeader(name))
}
