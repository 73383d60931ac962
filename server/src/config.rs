//! Server Configuration
//!
//! Loads configuration from environment variables.

use anyhow::Result;
use std::env;

use crate::auth::DEFAULT_TOLERANCE_SECS;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080")
    pub bind_address: String,

    /// Authenticate requests before dispatch (default: true).
    /// Only switch off for local debugging.
    pub validate_requests: bool,

    /// Allowed request timestamp drift in seconds (default: 150)
    pub timestamp_tolerance_secs: i64,

    /// Certificate download timeout in seconds (default: 10)
    pub cert_fetch_timeout_secs: u64,

    /// Maximum skill request body size in bytes (default: 256KB)
    pub max_body_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            validate_requests: env::var("VALIDATE_REQUESTS")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(true),
            timestamp_tolerance_secs: env::var("TIMESTAMP_TOLERANCE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs: &i64| *secs >= 0)
                .unwrap_or(DEFAULT_TOLERANCE_SECS),
            cert_fetch_timeout_secs: env::var("CERT_FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs: &u64| *secs > 0)
                .unwrap_or(10),
            max_body_bytes: env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|bytes: &usize| *bytes > 0)
                .unwrap_or(256 * 1024), // 256KB
        })
    }

    /// Create a default configuration for testing.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".into(),
            validate_requests: true,
            timestamp_tolerance_secs: DEFAULT_TOLERANCE_SECS,
            cert_fetch_timeout_secs: 10,
            max_body_bytes: 256 * 1024,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
