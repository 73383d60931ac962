//! Request Timestamp Freshness
//!
//! Replay protection: a request must declare a timestamp within a fixed
//! tolerance of the server clock, in either direction.

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

/// Tolerance the platform requires of published skills.
pub const DEFAULT_TOLERANCE_SECS: i64 = 150;

/// The only accepted timestamp layout (always UTC).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimestampError {
    /// Absent or not in [`TIMESTAMP_FORMAT`].
    #[error("timestamp missing or malformed")]
    Missing,

    #[error("timestamp off by {skew_secs}s")]
    SkewExceeded { skew_secs: i64 },
}

/// Parse a declared request timestamp.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Check `declared` against `now`, allowing `tolerance_secs` of drift.
pub fn check_timestamp(
    declared: Option<&str>,
    now: DateTime<Utc>,
    tolerance_secs: i64,
) -> Result<(), TimestampError> {
    let declared = declared
        .and_then(parse_timestamp)
        .ok_or(TimestampError::Missing)?;

    // Milliseconds so that 150.5s of drift is not truncated to 150s.
    let skew_ms = (now - declared).num_milliseconds().abs();
    if skew_ms > tolerance_secs.saturating_mul(1000) {
        return Err(TimestampError::SkewExceeded {
            skew_secs: skew_ms / 1000,
        });
    }

    Ok(())
}

/// Whether `declared` is within `tolerance_secs` of `now`.
pub fn is_fresh(declared: Option<&str>, now: DateTime<Utc>, tolerance_secs: i64) -> bool {
    check_timestamp(declared, now, tolerance_secs).is_ok()
}
