//! Certificate Validator
//!
//! Resolution order for a cert chain URL:
//! 1. Cache hit: return the cached record without touching the network.
//! 2. Location check on the parsed URL.
//! 3. Download (bounded by the fetcher's timeout, never retried here).
//! 4. Content check: parsable, inside its validity window, exact subject CN.
//! 5. Cache and return.
//!
//! Failed downloads are not cached, so the next request simply tries again.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use skill_crypto::ParsedCertificate;
use tracing::{debug, info, warn};

use super::cache::CertificateCache;
use super::error::CertError;
use super::fetch::CertificateFetcher;
use super::location::verify_cert_location;
use super::record::CertificateRecord;

/// Subject common name every signing certificate must carry.
pub const TRUSTED_COMMON_NAME: &str = "echo-api.amazon.com";

/// Validates signing certificates and owns the trust cache.
///
/// Cheap to clone; clones share the cache and the fetcher.
#[derive(Clone)]
pub struct CertificateValidator {
    cache: Arc<CertificateCache>,
    fetcher: Arc<dyn CertificateFetcher>,
}

impl CertificateValidator {
    /// Create a validator with a fresh cache.
    pub fn new(fetcher: Arc<dyn CertificateFetcher>) -> Self {
        Self::with_cache(fetcher, Arc::new(CertificateCache::new()))
    }

    /// Create a validator sharing an existing cache.
    pub fn with_cache(fetcher: Arc<dyn CertificateFetcher>, cache: Arc<CertificateCache>) -> Self {
        Self { cache, fetcher }
    }

    pub fn cache(&self) -> &CertificateCache {
        &self.cache
    }

    /// Resolve and validate the certificate at `url`.
    pub async fn validate(&self, url: &str) -> Result<Arc<CertificateRecord>, CertError> {
        self.validate_at(url, Utc::now()).await
    }

    /// [`Self::validate`] against an explicit clock.
    #[tracing::instrument(skip(self, now))]
    pub async fn validate_at(
        &self,
        url: &str,
        now: DateTime<Utc>,
    ) -> Result<Arc<CertificateRecord>, CertError> {
        if let Some(record) = self.cache.lookup(url, now).await {
            debug!("Certificate cache hit");
            return Ok(record);
        }

        let location = verify_cert_location(url).map_err(|e| {
            warn!(error = %e, "Rejected certificate location");
            CertError::InvalidLocation(e)
        })?;

        let pem = self.fetcher.fetch(&location).await.map_err(|e| {
            warn!(error = %e, "Certificate download failed");
            CertError::DownloadFailed(e)
        })?;

        let certificate = check_certificate(&pem, now)
            .inspect_err(|e| warn!(error = %e, "Rejected certificate"))?;

        let record = Arc::new(CertificateRecord {
            source_url: url.to_string(),
            pem,
            certificate,
        });
        self.cache.store(Arc::clone(&record), now).await;

        info!(not_after = %record.not_after(), "Signing certificate accepted");
        Ok(record)
    }
}

/// Decode the leaf certificate and apply the content trust checks.
fn check_certificate(pem: &[u8], now: DateTime<Utc>) -> Result<ParsedCertificate, CertError> {
    let certificate = ParsedCertificate::from_pem(pem)
        .map_err(|e| CertError::ExpiredOrUntrusted(format!("unparsable certificate: {e}")))?;

    if !certificate.is_valid_at(now) {
        return Err(CertError::ExpiredOrUntrusted(format!(
            "outside validity window {} .. {}",
            certificate.not_before, certificate.not_after
        )));
    }

    match certificate.common_name.as_deref() {
        Some(TRUSTED_COMMON_NAME) => Ok(certificate),
        other => Err(CertError::ExpiredOrUntrusted(format!(
            "untrusted subject {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use bytes::Bytes;
    use chrono::Duration;
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use reqwest::Url;

    const VALID: &[u8] = include_bytes!("../../../testdata/echo_api_valid.pem");
    const EXPIRED: &[u8] = include_bytes!("../../../testdata/echo_api_expired.pem");
    const WRONG_CN: &[u8] = include_bytes!("../../../testdata/wrong_cn.pem");
    const CHAIN: &[u8] = include_bytes!("../../../testdata/echo_api_chain.pem");

    const CERT_URL: &str = "https://s3.amazonaws.com/echo.api/echo-api-cert.pem";

    /// Serves fixed documents by normalized URL and counts fetches.
    #[derive(Default)]
    struct StaticFetcher {
        documents: HashMap<String, Bytes>,
        fetches: AtomicUsize,
    }

    impl StaticFetcher {
        fn serving(url: &str, pem: &'static [u8]) -> Self {
            let mut documents = HashMap::new();
            documents.insert(url.to_string(), Bytes::from_static(pem));
            Self {
                documents,
                fetches: AtomicUsize::new(0),
            }
        }

        fn fetches(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    impl CertificateFetcher for StaticFetcher {
        fn fetch<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<Bytes, String>> {
            async move {
                self.fetches.fetch_add(1, Ordering::SeqCst);
                self.documents
                    .get(url.as_str())
                    .cloned()
                    .ok_or_else(|| "404 Not Found".to_string())
            }
            .boxed()
        }
    }

    fn validator(fetcher: &Arc<StaticFetcher>) -> CertificateValidator {
        CertificateValidator::new(Arc::clone(fetcher) as Arc<dyn CertificateFetcher>)
    }

    #[tokio::test]
    async fn accepts_trusted_certificate() {
        let fetcher = Arc::new(StaticFetcher::serving(CERT_URL, VALID));
        let record = validator(&fetcher).validate(CERT_URL).await.unwrap();

        assert_eq!(record.common_name(), Some(TRUSTED_COMMON_NAME));
        assert_eq!(record.source_url, CERT_URL);
        assert_eq!(&record.pem[..], VALID);
    }

    #[tokio::test]
    async fn second_validation_is_served_from_cache() {
        let fetcher = Arc::new(StaticFetcher::serving(CERT_URL, VALID));
        let validator = validator(&fetcher);

        let first = validator.validate(CERT_URL).await.unwrap();
        let second = validator.validate(CERT_URL).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(fetcher.fetches(), 1);
    }

    #[tokio::test]
    async fn refetches_after_cached_record_expires() {
        let fetcher = Arc::new(StaticFetcher::serving(CERT_URL, VALID));
        let validator = validator(&fetcher);

        let record = validator.validate(CERT_URL).await.unwrap();
        let later = record.not_after() + Duration::seconds(1);

        // Cache is cleared, the refetched certificate is itself expired by then.
        let result = validator.validate_at(CERT_URL, later).await;
        assert!(matches!(result, Err(CertError::ExpiredOrUntrusted(_))));
        assert_eq!(fetcher.fetches(), 2);
        assert!(validator.cache().is_empty().await);
    }

    #[tokio::test]
    async fn rejects_bad_location_without_fetching() {
        let fetcher = Arc::new(StaticFetcher::default());
        let validator = validator(&fetcher);

        for url in [
            "http://s3.amazonaws.com/echo.api/echo-api-cert.pem",
            "https://notamazon.com/echo.api/echo-api-cert.pem",
            "https://s3.amazonaws.com/EcHo.aPi/echo-api-cert.pem",
            "https://s3.amazonaws.com/invalid.path/echo-api-cert.pem",
            "https://s3.amazonaws.com:563/echo.api/echo-api-cert.pem",
            "https://s3.amazonaws.com/echo.api/../invalid.path/echo-api-cert.pem",
        ] {
            let result = validator.validate(url).await;
            assert!(
                matches!(result, Err(CertError::InvalidLocation(_))),
                "{url} should be rejected, got {result:?}"
            );
        }
        assert_eq!(fetcher.fetches(), 0);
    }

    #[tokio::test]
    async fn expired_certificate_is_untrusted_not_mislocated() {
        let fetcher = Arc::new(StaticFetcher::serving(CERT_URL, EXPIRED));
        let result = validator(&fetcher).validate(CERT_URL).await;
        assert!(matches!(result, Err(CertError::ExpiredOrUntrusted(_))));
    }

    #[tokio::test]
    async fn wrong_common_name_is_untrusted() {
        let fetcher = Arc::new(StaticFetcher::serving(CERT_URL, WRONG_CN));
        let validator = validator(&fetcher);
        let result = validator.validate(CERT_URL).await;
        assert!(matches!(result, Err(CertError::ExpiredOrUntrusted(_))));
        assert!(validator.cache().is_empty().await);
    }

    #[tokio::test]
    async fn unparsable_document_is_untrusted() {
        let fetcher = Arc::new(StaticFetcher::serving(CERT_URL, b"<html>Access Denied</html>"));
        let result = validator(&fetcher).validate(CERT_URL).await;
        assert!(matches!(result, Err(CertError::ExpiredOrUntrusted(_))));
    }

    #[tokio::test]
    async fn download_failure_is_not_cached() {
        let fetcher = Arc::new(StaticFetcher::default());
        let validator = validator(&fetcher);

        for _ in 0..2 {
            let result = validator.validate(CERT_URL).await;
            assert!(matches!(result, Err(CertError::DownloadFailed(_))));
        }
        assert_eq!(fetcher.fetches(), 2);
    }

    #[tokio::test]
    async fn accepts_chain_document() {
        let fetcher = Arc::new(StaticFetcher::serving(CERT_URL, CHAIN));
        let record = validator(&fetcher).validate(CERT_URL).await.unwrap();
        assert_eq!(record.common_name(), Some(TRUSTED_COMMON_NAME));
    }

    #[tokio::test]
    async fn fetches_normalized_url() {
        let fetcher = Arc::new(StaticFetcher::serving(CERT_URL, VALID));
        let raw = "https://s3.amazonaws.com:443/echo.api/../echo.api/echo-api-cert.pem";
        let record = validator(&fetcher).validate(raw).await.unwrap();
        // Cached under the URL as the request named it.
        assert_eq!(record.source_url, raw);
    }
}
