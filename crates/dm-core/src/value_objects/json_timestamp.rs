//! Strict timestamp codec for values nested inside JSON payloads
//!
//! PostgreSQL renders `timestamp without time zone` values inside `jsonb` as
//! plain strings such as `2023-01-02T03:04:05.123456`. The driver decodes native
//! timestamp columns itself but leaves these nested strings alone, so every
//! timestamp that crosses a JSON boundary goes through this module instead.
//!
//! Accepted shape: `YYYY-MM-DDTHH:MM:SS`, optionally followed by `.` and one to
//! six fractional digits. No timezone suffix; the value is read as UTC.
//!
//! Use it as a serde adapter:
//!
//! ```rust
//! use chrono::{DateTime, Utc};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Row {
//!     #[serde(with = "dm_core::json_timestamp")]
//!     created_at: DateTime<Utc>,
//! }
//!
//! let row: Row = serde_json::from_str(r#"{"created_at":"2023-01-02T03:04:05.1"}"#).unwrap();
//! assert_eq!(row.created_at.timestamp_subsec_micros(), 100_000);
//! ```

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serializer};
use thiserror::Error;

use crate::error::DomainError;

/// Format used for both parsing (after shape validation) and rendering
const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const RENDER_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Length of `YYYY-MM-DDTHH:MM:SS`
const BASE_LEN: usize = 19;
const MAX_FRACTION_DIGITS: usize = 6;

/// Timestamp decoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampDecodeError {
    #[error("malformed timestamp {0:?}: expected YYYY-MM-DDTHH:MM:SS[.ffffff]")]
    Malformed(String),

    #[error("timestamp {0:?} is not a valid calendar instant")]
    OutOfRange(String),
}

impl From<TimestampDecodeError> for DomainError {
    fn from(err: TimestampDecodeError) -> Self {
        DomainError::DecodeError(err.to_string())
    }
}

/// Parse a JSON-embedded timestamp string
pub fn parse(value: &str) -> Result<DateTime<Utc>, TimestampDecodeError> {
    if !has_strict_shape(value.as_bytes()) {
        return Err(TimestampDecodeError::Malformed(value.to_string()));
    }

    NaiveDateTime::parse_from_str(value, PARSE_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| TimestampDecodeError::OutOfRange(value.to_string()))
}

/// Render a timestamp in the shape accepted by [`parse`] (microsecond precision)
pub fn format(value: &DateTime<Utc>) -> String {
    value.naive_utc().format(RENDER_FORMAT).to_string()
}

/// Check the exact byte layout; chrono alone accepts signs, short years, and long fractions.
fn has_strict_shape(bytes: &[u8]) -> bool {
    if bytes.len() < BASE_LEN {
        return false;
    }

    let (base, fraction) = bytes.split_at(BASE_LEN);
    let base_ok = base.iter().enumerate().all(|(i, &b)| match i {
        4 | 7 => b == b'-',
        10 => b == b'T',
        13 | 16 => b == b':',
        _ => b.is_ascii_digit(),
    });
    if !base_ok {
        return false;
    }

    match fraction.split_first() {
        None => true,
        Some((b'.', digits)) => {
            (1..=MAX_FRACTION_DIGITS).contains(&digits.len())
                && digits.iter().all(u8::is_ascii_digit)
        }
        Some(_) => false,
    }
}

/// Serde serializer for `#[serde(with = "json_timestamp")]`
pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

/// Serde deserializer for `#[serde(with = "json_timestamp")]`
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(de::Error::custom)
}
