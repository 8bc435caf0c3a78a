//! Cursor-based page query for message history

use chrono::{DateTime, TimeDelta, Utc};

use crate::entities::MessageWithReactions;
use crate::error::DomainError;

/// Query parameters for backward-in-time message pagination
///
/// `cursor` is an exclusive upper bound on message creation time. Since it is a
/// timestamp and not an offset, messages inserted while a caller pages never shift
/// already-returned results into a later page.
///
/// Stored timestamps carry microsecond precision, so the cursor is rounded up to
/// the next whole microsecond. Every stored instant before the requested cursor
/// stays before the rounded one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessagePageQuery {
    limit: i64,
    cursor: DateTime<Utc>,
}

impl MessagePageQuery {
    /// Create a validated page query
    pub fn new(limit: i64, cursor: DateTime<Utc>) -> Result<Self, DomainError> {
        if limit <= 0 {
            return Err(DomainError::ValidationError(format!(
                "page limit must be positive, got {limit}"
            )));
        }
        let cursor = ceil_to_micros(cursor).ok_or_else(|| {
            DomainError::ValidationError(format!("page cursor {cursor} is out of range"))
        })?;
        Ok(Self { limit, cursor })
    }

    /// Maximum number of messages in the page
    #[inline]
    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Exclusive upper bound on `created_at`, at microsecond precision
    #[inline]
    pub fn cursor(&self) -> DateTime<Utc> {
        self.cursor
    }

    /// Query for the newest messages, anchored at the current time
    pub fn latest(limit: i64) -> Result<Self, DomainError> {
        Self::new(limit, Utc::now())
    }

    /// Build the query for the page following `page`
    ///
    /// Returns `None` when the page is empty, since there is nothing to anchor on.
    pub fn next_after(&self, page: &[MessageWithReactions]) -> Option<Self> {
        let last = page.last()?;
        Some(Self {
            limit: self.limit,
            cursor: ceil_to_micros(last.message.created_at)?,
        })
    }
}

fn ceil_to_micros(at: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match at.timestamp_subsec_nanos() % 1_000 {
        0 => Some(at),
        rem => at.checked_add_signed(TimeDelta::nanoseconds(i64::from(1_000 - rem))),
    }
}
