//! Send-rate service
//!
//! Gathers the counts a caller needs to decide whether to accept another
//! outbound message. Thresholds are the caller's policy; none are applied here.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Messages a user sent after some instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendRateCounts {
    /// Across every chat
    pub global: i64,
    /// Within the chat being sent to
    pub per_chat: i64,
}

/// Send-rate service
pub struct SendRateService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SendRateService<'a> {
    /// Create a new SendRateService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Count the user's messages after `since`, globally and into `chat_id`
    #[instrument(skip(self))]
    pub async fn snapshot(
        &self,
        user_id: i32,
        chat_id: &str,
        since: DateTime<Utc>,
    ) -> ServiceResult<SendRateCounts> {
        let counter = self.ctx.rate_counter();
        let (global, per_chat) = tokio::try_join!(
            counter.count_messages_since(user_id, since),
            counter.count_messages_to_recipient_since(user_id, chat_id, since),
        )?;

        debug!(global, per_chat, "Computed send-rate counts");
        Ok(SendRateCounts { global, per_chat })
    }

    /// Snapshot over the configured window ending at `now`
    pub async fn snapshot_window(
        &self,
        user_id: i32,
        chat_id: &str,
        now: DateTime<Utc>,
    ) -> ServiceResult<SendRateCounts> {
        let since = self.window_start(now)?;
        self.snapshot(user_id, chat_id, since).await
    }

    /// Start of the configured rate window ending at `now`
    pub fn window_start(&self, now: DateTime<Utc>) -> ServiceResult<DateTime<Utc>> {
        let window = TimeDelta::from_std(self.ctx.history().rate_window())
            .map_err(|_| ServiceError::internal("rate window does not fit a time delta"))?;
        now.checked_sub_signed(window)
            .ok_or_else(|| ServiceError::internal("rate window reaches before the minimum timestamp"))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;
    use dm_common::HistoryConfig;
    use dm_core::DomainError;

    use super::*;
    use crate::services::in_memory::{FailingStore, InMemoryMessageStore};

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn context(window_secs: u64) -> ServiceContext {
        let store = Arc::new(InMemoryMessageStore::new());
        store.add_message("C1", "a", 7, t(100));
        store.add_message("C1", "b", 7, t(150));
        store.add_message("C2", "c", 7, t(160));
        store.add_message("C1", "d", 8, t(170));

        let history = HistoryConfig {
            rate_window_secs: window_secs,
            ..HistoryConfig::default()
        };
        ServiceContext::new(store.clone(), store, history)
    }

    #[tokio::test]
    async fn test_snapshot_counts_strictly_after_cursor() {
        let ctx = context(60);
        let service = SendRateService::new(&ctx);

        let counts = service.snapshot(7, "C1", t(100)).await.unwrap();
        assert_eq!(counts, SendRateCounts { global: 2, per_chat: 1 });

        let counts = service.snapshot(7, "C1", t(0)).await.unwrap();
        assert_eq!(counts, SendRateCounts { global: 3, per_chat: 2 });
    }

    #[tokio::test]
    async fn test_counts_never_grow_with_later_cursor() {
        let ctx = context(60);
        let service = SendRateService::new(&ctx);

        let mut previous = SendRateCounts { global: i64::MAX, per_chat: i64::MAX };
        for secs in [0, 100, 120, 150, 160, 200] {
            let counts = service.snapshot(7, "C1", t(secs)).await.unwrap();
            assert!(counts.global <= previous.global);
            assert!(counts.per_chat <= previous.per_chat);
            previous = counts;
        }
        assert_eq!(previous, SendRateCounts { global: 0, per_chat: 0 });
    }

    #[tokio::test]
    async fn test_snapshot_window_uses_config() {
        let ctx = context(30);
        let service = SendRateService::new(&ctx);

        assert_eq!(service.window_start(t(180)).unwrap(), t(150));
        let counts = service.snapshot_window(7, "C1", t(180)).await.unwrap();
        assert_eq!(counts, SendRateCounts { global: 1, per_chat: 0 });
    }

    #[tokio::test]
    async fn test_errors_propagate() {
        let store = Arc::new(FailingStore(|| DomainError::Canceled("deadline".to_string())));
        let ctx = ServiceContext::new(store.clone(), store, HistoryConfig::default());
        let service = SendRateService::new(&ctx);

        let err = service.snapshot(7, "C1", t(0)).await.unwrap_err();
        assert!(err.as_domain().is_some_and(DomainError::is_canceled));
    }
}
