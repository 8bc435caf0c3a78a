//! Error handling utilities for repositories

use dm_core::error::DomainError;
use sqlx::Error as SqlxError;

/// SQLSTATE raised when PostgreSQL aborts a statement (statement_timeout, pg_cancel_backend)
const QUERY_CANCELED: &str = "57014";

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    match &e {
        SqlxError::ColumnDecode { .. } | SqlxError::Decode(_) => {
            DomainError::DecodeError(e.to_string())
        }
        SqlxError::Database(db_err) if db_err.code().as_deref() == Some(QUERY_CANCELED) => {
            DomainError::Canceled(e.to_string())
        }
        _ => DomainError::DatabaseError(e.to_string()),
    }
}

/// Map the driver's "no rows" condition to a not-found error, anything else through `map_db_error`
pub fn map_not_found<F>(e: SqlxError, on_missing: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if matches!(e, SqlxError::RowNotFound) {
        return on_missing();
    }
    map_db_error(e)
}
