//! Message history service
//!
//! Pages backward through a chat's messages on behalf of a member.

use chrono::{DateTime, Utc};
use dm_core::entities::{ChatMessage, MessageWithReactions};
use dm_core::MessagePageQuery;
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// One page of history plus the cursor for the next (older) page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePage {
    pub messages: Vec<MessageWithReactions>,
    /// `Some` when the page was full and older messages may remain
    pub next_cursor: Option<DateTime<Utc>>,
}

impl MessagePage {
    /// Check if there may be older messages to fetch
    #[inline]
    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}

/// Message history service
pub struct MessageHistoryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageHistoryService<'a> {
    /// Create a new MessageHistoryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get a single message by its composite key
    #[instrument(skip(self))]
    pub async fn get_message(&self, chat_id: &str, message_id: &str) -> ServiceResult<ChatMessage> {
        Ok(self.ctx.message_repo().get_message(chat_id, message_id).await?)
    }

    /// Get a page of messages older than `before` (default: now)
    ///
    /// `limit` defaults to the configured page size and is capped at the configured maximum.
    #[instrument(skip(self))]
    pub async fn get_page(
        &self,
        user_id: i32,
        chat_id: &str,
        limit: Option<i64>,
        before: Option<DateTime<Utc>>,
    ) -> ServiceResult<MessagePage> {
        let query = self.page_query(limit, before)?;

        let messages = self
            .ctx
            .message_repo()
            .get_message_page(user_id, chat_id, query)
            .await?;

        let next_cursor = if messages.len() as i64 == query.limit() {
            query.next_after(&messages).map(|next| next.cursor())
        } else {
            None
        };

        debug!(count = messages.len(), has_more = next_cursor.is_some(), "Served history page");
        Ok(MessagePage {
            messages,
            next_cursor,
        })
    }

    fn page_query(
        &self,
        limit: Option<i64>,
        before: Option<DateTime<Utc>>,
    ) -> ServiceResult<MessagePageQuery> {
        let settings = self.ctx.history();
        let limit = limit.map_or(settings.default_page_size, |requested| {
            requested.min(settings.max_page_size)
        });

        Ok(MessagePageQuery::new(limit, before.unwrap_or_else(Utc::now))?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;
    use dm_common::HistoryConfig;
    use dm_core::entities::ChatMember;
    use dm_core::DomainError;

    use super::*;
    use crate::services::in_memory::{FailingStore, InMemoryMessageStore};

    const READER: i32 = 1;
    const AUTHOR: i32 = 2;

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn context(store: Arc<InMemoryMessageStore>, history: HistoryConfig) -> ServiceContext {
        ServiceContext::new(store.clone(), store, history)
    }

    /// Chat C1 with M1@10, M2@20, M3@30
    fn seeded(cleared: Option<DateTime<Utc>>) -> Arc<InMemoryMessageStore> {
        let store = Arc::new(InMemoryMessageStore::new());
        store.add_member(ChatMember {
            cleared_history_at: cleared,
            ..ChatMember::new("C1", READER)
        });
        store.add_member(ChatMember::new("C1", AUTHOR));
        store.add_message("C1", "M1", AUTHOR, t(10));
        store.add_message("C1", "M2", AUTHOR, t(20));
        store.add_message("C1", "M3", AUTHOR, t(30));
        store
    }

    fn ids(page: &MessagePage) -> Vec<&str> {
        page.messages.iter().map(|m| m.message.message_id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_full_page_returns_next_cursor() {
        let ctx = context(seeded(None), HistoryConfig::default());
        let service = MessageHistoryService::new(&ctx);

        let page = service.get_page(READER, "C1", Some(2), Some(t(31))).await.unwrap();
        assert_eq!(ids(&page), vec!["M3", "M2"]);
        assert_eq!(page.next_cursor, Some(t(20)));

        let rest = service.get_page(READER, "C1", Some(2), page.next_cursor).await.unwrap();
        assert_eq!(ids(&rest), vec!["M1"]);
        assert!(!rest.has_more());
    }

    #[tokio::test]
    async fn test_cleared_history_excludes_older_messages() {
        let ctx = context(seeded(Some(t(15))), HistoryConfig::default());
        let service = MessageHistoryService::new(&ctx);

        let page = service.get_page(READER, "C1", Some(10), Some(t(100))).await.unwrap();
        assert_eq!(ids(&page), vec!["M3", "M2"]);
        assert!(page.next_cursor.is_none());
    }

    #[tokio::test]
    async fn test_non_member_sees_nothing() {
        let ctx = context(seeded(None), HistoryConfig::default());
        let service = MessageHistoryService::new(&ctx);

        let page = service.get_page(99, "C1", None, None).await.unwrap();
        assert!(page.messages.is_empty());
        assert!(!page.has_more());
    }

    #[tokio::test]
    async fn test_limit_defaults_and_caps() {
        let store = seeded(None);
        let history = HistoryConfig {
            default_page_size: 1,
            max_page_size: 2,
            rate_window_secs: 60,
        };
        let ctx = context(store, history);
        let service = MessageHistoryService::new(&ctx);

        let page = service.get_page(READER, "C1", None, None).await.unwrap();
        assert_eq!(ids(&page), vec!["M3"]);

        let page = service.get_page(READER, "C1", Some(500), None).await.unwrap();
        assert_eq!(ids(&page), vec!["M3", "M2"]);
        assert_eq!(page.next_cursor, Some(t(20)));
    }

    #[tokio::test]
    async fn test_rejects_non_positive_limit() {
        let ctx = context(seeded(None), HistoryConfig::default());
        let service = MessageHistoryService::new(&ctx);

        let err = service.get_page(READER, "C1", Some(0), None).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_cursor_within_same_microsecond_keeps_message() {
        let ctx = context(seeded(None), HistoryConfig::default());
        let service = MessageHistoryService::new(&ctx);

        let cursor = t(30) + chrono::TimeDelta::nanoseconds(500);
        let page = service.get_page(READER, "C1", Some(10), Some(cursor)).await.unwrap();
        assert_eq!(ids(&page), vec!["M3", "M2", "M1"]);
    }

    #[tokio::test]
    async fn test_reactions_ride_along() {
        let store = seeded(None);
        store.add_reaction("M2", READER, "heart", t(21));
        let ctx = context(store, HistoryConfig::default());
        let service = MessageHistoryService::new(&ctx);

        let page = service.get_page(READER, "C1", Some(10), Some(t(100))).await.unwrap();
        let by_id = |id: &str| page.messages.iter().find(|m| m.message.message_id == id).unwrap();

        assert_eq!(by_id("M2").reaction_by(READER).map(|r| r.reaction.as_str()), Some("heart"));
        assert!(by_id("M1").reactions.is_empty());
        assert!(by_id("M3").reactions.is_empty());
    }

    #[tokio::test]
    async fn test_get_message_not_found() {
        let ctx = context(seeded(None), HistoryConfig::default());
        let service = MessageHistoryService::new(&ctx);

        assert_eq!(service.get_message("C1", "M2").await.unwrap().created_at, t(20));

        let err = service.get_message("C1", "does-not-exist").await.unwrap_err();
        assert!(err.as_domain().is_some_and(DomainError::is_not_found));
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_storage_errors_propagate() {
        let store = Arc::new(FailingStore(|| DomainError::DatabaseError("connection reset".to_string())));
        let ctx = ServiceContext::new(store.clone(), store, HistoryConfig::default());
        let service = MessageHistoryService::new(&ctx);

        let err = service.get_page(READER, "C1", None, None).await.unwrap_err();
        assert_eq!(err.error_code(), "DATABASE_ERROR");
    }
}
