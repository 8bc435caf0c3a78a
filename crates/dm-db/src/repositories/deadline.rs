//! Per-query deadlines

use std::future::Future;
use std::time::Duration;

use dm_core::error::DomainError;
use dm_core::traits::RepoResult;
use tracing::warn;

/// Run `operation` under an optional deadline
///
/// On expiry the in-flight future is dropped, which releases its pooled
/// connection, and the call fails with `DomainError::Canceled`.
pub async fn with_deadline<T, F>(
    timeout: Option<Duration>,
    operation: &'static str,
    future: F,
) -> RepoResult<T>
where
    F: Future<Output = RepoResult<T>>,
{
    let Some(limit) = timeout else {
        return future.await;
    };

    match tokio::time::timeout(limit, future).await {
        Ok(result) => result,
        Err(_) => {
            warn!(operation, timeout_ms = limit.as_millis() as u64, "Query deadline exceeded");
            Err(DomainError::Canceled(format!(
                "{operation} exceeded deadline of {}ms",
                limit.as_millis()
            )))
        }
    }
}
