//! Reusable test helpers for HTTP integration tests.
//!
//! Provides `TestApp` for building and sending requests through the full axum
//! router, an in-memory certificate fetcher, and request signing with the
//! fixture key.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{self, Method, Request, Response};
use axum::Router;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use futures::FutureExt;
use http_body_util::BodyExt;
use reqwest::Url;
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::signature::{SignatureEncoding, Signer};
use rsa::RsaPrivateKey;
use sha1::Sha1;
use tower::ServiceExt;

use skill_server::api::{create_router, AppState};
use skill_server::auth::{RequestAuthenticator, CERT_CHAIN_URL_HEADER, SIGNATURE_HEADER};
use skill_server::certs::{CertificateFetcher, CertificateValidator};
use skill_server::config::Config;
use skill_server::skill::Skill;

pub const VALID_CERT: &[u8] = include_bytes!("../../../testdata/echo_api_valid.pem");
pub const EXPIRED_CERT: &[u8] = include_bytes!("../../../testdata/echo_api_expired.pem");
pub const WRONG_CN_CERT: &[u8] = include_bytes!("../../../testdata/wrong_cn.pem");
pub const SIGNING_KEY: &str = include_str!("../../../testdata/signing_key.pem");
pub const OTHER_KEY: &str = include_str!("../../../testdata/other_key.pem");

pub const CERT_URL: &str = "https://s3.amazonaws.com/echo.api/echo-api-cert.pem";

// ============================================================================
// Certificate fetcher
// ============================================================================

/// Serves one PEM document for every URL and counts downloads.
pub struct StaticFetcher {
    pem: &'static [u8],
    fetches: AtomicUsize,
}

impl StaticFetcher {
    pub fn new(pem: &'static [u8]) -> Arc<Self> {
        Arc::new(Self {
            pem,
            fetches: AtomicUsize::new(0),
        })
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl CertificateFetcher for StaticFetcher {
    fn fetch<'a>(&'a self, _url: &'a Url) -> BoxFuture<'a, Result<Bytes, String>> {
        async move {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(Bytes::from_static(self.pem))
        }
        .boxed()
    }
}

// ============================================================================
// Test app
// ============================================================================

/// Full router over an in-memory certificate source.
pub struct TestApp {
    pub router: Router,
    pub fetcher: Arc<StaticFetcher>,
    pub config: Config,
}

impl TestApp {
    /// The sample skill behind request validation, trusting the valid fixture.
    pub fn new() -> Self {
        Self::with_config(Config::default_for_test(), VALID_CERT)
    }

    /// Build a test app with a custom config and certificate document.
    pub fn with_config(config: Config, pem: &'static [u8]) -> Self {
        let skill = skill_server::demo::demo_skill().expect("sample skill registers");
        Self::with_skill(config, pem, skill)
    }

    pub fn with_skill(config: Config, pem: &'static [u8], skill: Skill) -> Self {
        let fetcher = StaticFetcher::new(pem);
        let validator = CertificateValidator::new(Arc::clone(&fetcher) as Arc<dyn CertificateFetcher>);
        let authenticator =
            RequestAuthenticator::new(validator).with_tolerance(config.timestamp_tolerance_secs);

        let state = AppState::new(config.clone(), authenticator, skill);
        let router = create_router(state);

        Self {
            router,
            fetcher,
            config,
        }
    }

    /// Build an HTTP request with the given method and URI.
    pub fn request(method: Method, uri: &str) -> http::request::Builder {
        Request::builder().method(method).uri(uri)
    }

    /// Send a request through the router via `tower::ServiceExt::oneshot`.
    pub async fn oneshot(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("oneshot request failed")
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Request body of the given type stamped with `timestamp`.
pub fn skill_body(request_type: &str, timestamp: DateTime<Utc>) -> Vec<u8> {
    serde_json::json!({
        "version": "1.0",
        "session": {"new": true, "sessionId": "amzn1.echo-api.session.0000"},
        "request": {
            "type": request_type,
            "requestId": "amzn1.echo-api.request.0000",
            "timestamp": timestamp.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        }
    })
    .to_string()
    .into_bytes()
}

/// Intent request body stamped with the current time.
pub fn intent_body(name: &str) -> Vec<u8> {
    serde_json::json!({
        "version": "1.0",
        "request": {
            "type": "IntentRequest",
            "timestamp": Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            "intent": {"name": name, "slots": {}}
        }
    })
    .to_string()
    .into_bytes()
}

/// Base64 RSA-SHA1 signature of `body` with a PKCS#8 PEM key.
pub fn sign_with(key_pem: &str, body: &[u8]) -> String {
    let key = RsaPrivateKey::from_pkcs8_pem(key_pem).expect("fixture key parses");
    STANDARD.encode(SigningKey::<Sha1>::new(key).sign(body).to_vec())
}

pub fn sign(body: &[u8]) -> String {
    sign_with(SIGNING_KEY, body)
}

/// POST `body` to the skill endpoint with the given signature headers.
pub fn skill_request(body: Vec<u8>, cert_url: Option<&str>, signature: Option<&str>) -> Request<Body> {
    let mut builder = TestApp::request(Method::POST, "/").header("content-type", "application/json");
    if let Some(url) = cert_url {
        builder = builder.header(CERT_CHAIN_URL_HEADER, url);
    }
    if let Some(signature) = signature {
        builder = builder.header(SIGNATURE_HEADER, signature);
    }
    builder.body(Body::from(body)).expect("request builds")
}

/// A correctly signed request for `body`.
pub fn signed_request(body: Vec<u8>) -> Request<Body> {
    let signature = sign(&body);
    skill_request(body, Some(CERT_URL), Some(&signature))
}

// ============================================================================
// Responses
// ============================================================================

pub async fn body_to_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to collect response body")
        .to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        let preview = String::from_utf8_lossy(&bytes);
        panic!("Failed to parse response as JSON: {e}\nBody: {preview}")
    })
}
