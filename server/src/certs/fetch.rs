//! Certificate Download
//!
//! The validator fetches PEM documents through the [`CertificateFetcher`]
//! seam so hosts can swap the transport; [`HttpCertificateFetcher`] is the
//! production implementation.

use std::time::Duration;

use bytes::Bytes;
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::{StatusCode, Url};

/// Upper bound on a cert chain document. Real chains are a few KiB.
pub const MAX_CERT_DOCUMENT_BYTES: usize = 64 * 1024;

/// Source of certificate documents.
pub trait CertificateFetcher: Send + Sync {
    /// Download the document at `url`. Any error is reported as a string and
    /// surfaces as a download failure.
    fn fetch<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<Bytes, String>>;
}

/// Fetches certificates over HTTPS with a bounded timeout.
#[derive(Debug, Clone)]
pub struct HttpCertificateFetcher {
    client: reqwest::Client,
}

impl HttpCertificateFetcher {
    /// Build a fetcher whose requests give up after `timeout`.
    ///
    /// Redirects are not followed: a redirect could point outside the
    /// trusted location that was checked before the fetch.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl CertificateFetcher for HttpCertificateFetcher {
    fn fetch<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<Bytes, String>> {
        async move {
            let resp = self
                .client
                .get(url.clone())
                .send()
                .await
                .map_err(|e| format!("request failed: {e}"))?;

            if resp.status() != StatusCode::OK {
                return Err(format!("unexpected status {}", resp.status()));
            }

            if resp
                .content_length()
                .is_some_and(|len| len > MAX_CERT_DOCUMENT_BYTES as u64)
            {
                return Err("certificate document too large".to_string());
            }

            let body = resp
                .bytes()
                .await
                .map_err(|e| format!("failed to read body: {e}"))?;

            if body.len() > MAX_CERT_DOCUMENT_BYTES {
                return Err("certificate document too large".to_string());
            }

            Ok(body)
        }
        .boxed()
    }
}
