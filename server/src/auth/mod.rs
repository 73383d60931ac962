//! Request Authentication
//!
//! Decides whether an inbound request really comes from the voice platform:
//! trusted signing certificate, valid RSA-SHA1 signature over the raw body,
//! and a fresh timestamp.

mod authenticator;
mod error;
mod middleware;
pub mod timestamp;

pub use authenticator::{RequestAuthenticator, CERT_CHAIN_URL_HEADER, SIGNATURE_HEADER};
pub use error::{AuthFailure, AuthResult, ErrorResponse};
pub use middleware::require_signed_request;
pub use timestamp::{check_timestamp, is_fresh, TimestampError, DEFAULT_TOLERANCE_SECS};
