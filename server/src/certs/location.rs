//! Certificate Location Checks
//!
//! Only certificates published under the platform's signing bucket are
//! fetched. Every check is an exact match on the parsed URL; prefix or
//! substring tests on the raw string would let `s3.amazonaws.com.evil.com`
//! or `/echo.api-evil/` through.

use reqwest::Url;

/// Required URL scheme.
pub const TRUSTED_SCHEME: &str = "https";

/// Required host, compared case-insensitively.
pub const TRUSTED_HOST: &str = "s3.amazonaws.com";

/// The only port allowed, explicit or implied.
pub const TRUSTED_PORT: u16 = 443;

/// Required prefix of the dot-segment-normalized path (case-sensitive).
pub const TRUSTED_PATH_PREFIX: &str = "/echo.api/";

/// Parse a cert chain URL and check it against the trusted location.
///
/// Parsing lowercases the scheme and host and resolves `.` and `..` path
/// segments (including their percent-encoded forms), so the checks below run
/// on the normalized URL. Returns the parsed URL to fetch from.
pub fn verify_cert_location(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| format!("Invalid URL: {e}"))?;

    if url.scheme() != TRUSTED_SCHEME {
        return Err(format!("scheme must be {TRUSTED_SCHEME}, got {}", url.scheme()));
    }

    if !url.username().is_empty() || url.password().is_some() {
        return Err("URL must not carry credentials".to_string());
    }

    let host = url
        .host_str()
        .ok_or_else(|| "URL has no host".to_string())?
        .to_ascii_lowercase();
    if host != TRUSTED_HOST {
        return Err(format!("untrusted host {host}"));
    }

    // `port()` is None when the URL names the scheme's default port.
    if let Some(port) = url.port() {
        if port != TRUSTED_PORT {
            return Err(format!("untrusted port {port}"));
        }
    }

    if !url.path().starts_with(TRUSTED_PATH_PREFIX) {
        return Err(format!("path {} is outside {TRUSTED_PATH_PREFIX}", url.path()));
    }

    Ok(url)
}
