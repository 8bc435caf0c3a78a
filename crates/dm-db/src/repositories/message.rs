//! PostgreSQL implementation of ChatMessageRepository and MessageRateCounter

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};

use dm_core::entities::{ChatMessage, MessageWithReactions};
use dm_core::error::DomainError;
use dm_core::traits::{ChatMessageRepository, MessageRateCounter, RepoResult};
use dm_core::value_objects::MessagePageQuery;

use crate::models::{ChatMessageModel, ChatMessageWithReactionsModel};

use super::deadline::with_deadline;
use super::error::{map_db_error, map_not_found};

/// PostgreSQL implementation of the message history and send-rate queries
#[derive(Clone)]
pub struct PgChatMessageRepository {
    pool: PgPool,
    query_timeout: Option<Duration>,
}

impl PgChatMessageRepository {
    /// Create a new PgChatMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            query_timeout: None,
        }
    }

    /// Abort each query that runs longer than `timeout`
    pub fn with_query_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.query_timeout = timeout;
        self
    }
}

#[async_trait]
impl ChatMessageRepository for PgChatMessageRepository {
    #[instrument(skip(self))]
    async fn get_message(&self, chat_id: &str, message_id: &str) -> RepoResult<ChatMessage> {
        let query = async {
            sqlx::query_as::<_, ChatMessageModel>(
                r#"
                SELECT message_id, chat_id, user_id, created_at, ciphertext
                FROM chat_message
                WHERE chat_id = $1 AND message_id = $2
                "#,
            )
            .bind(chat_id)
            .bind(message_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_not_found(e, || DomainError::message_not_found(chat_id, message_id)))
        };

        let model = with_deadline(self.query_timeout, "get_message", query).await?;
        Ok(ChatMessage::from(model))
    }

    #[instrument(skip(self))]
    async fn get_message_page(
        &self,
        user_id: i32,
        chat_id: &str,
        query: MessagePageQuery,
    ) -> RepoResult<Vec<MessageWithReactions>> {
        // One row per message with reactions folded in, so a page costs a single round trip.
        // The inner join on chat_member yields nothing for non-members.
        let fetch = async {
            sqlx::query_as::<_, ChatMessageWithReactionsModel>(
                r#"
                SELECT
                    chat_message.message_id,
                    chat_message.chat_id,
                    chat_message.user_id,
                    chat_message.created_at,
                    chat_message.ciphertext,
                    COALESCE(
                        jsonb_agg(reactions) FILTER (WHERE reactions.message_id IS NOT NULL),
                        '[]'
                    ) AS reactions
                FROM chat_message
                JOIN chat_member ON chat_message.chat_id = chat_member.chat_id
                LEFT JOIN chat_message_reactions reactions
                    ON chat_message.message_id = reactions.message_id
                WHERE chat_member.user_id = $1
                    AND chat_message.chat_id = $2
                    AND chat_message.created_at < $4
                    AND (
                        chat_member.cleared_history_at IS NULL
                        OR chat_message.created_at > chat_member.cleared_history_at
                    )
                GROUP BY chat_message.chat_id, chat_message.message_id
                ORDER BY chat_message.created_at DESC, chat_message.message_id ASC
                LIMIT $3
                "#,
            )
            .bind(user_id)
            .bind(chat_id)
            .bind(query.limit())
            .bind(query.cursor().naive_utc())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)
        };

        let rows = with_deadline(self.query_timeout, "get_message_page", fetch).await?;
        let page = rows
            .into_iter()
            .map(MessageWithReactions::try_from)
            .collect::<RepoResult<Vec<_>>>()?;

        debug!(count = page.len(), "Loaded message page");
        Ok(page)
    }
}

#[async_trait]
impl MessageRateCounter for PgChatMessageRepository {
    #[instrument(skip(self))]
    async fn count_messages_since(&self, user_id: i32, cursor: DateTime<Utc>) -> RepoResult<i64> {
        let query = async {
            sqlx::query_scalar::<_, i64>(
                r#"
                SELECT COUNT(*)
                FROM chat_message
                WHERE user_id = $1 AND created_at > $2
                "#,
            )
            .bind(user_id)
            .bind(cursor.naive_utc())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
        };

        with_deadline(self.query_timeout, "count_messages_since", query).await
    }

    #[instrument(skip(self))]
    async fn count_messages_to_recipient_since(
        &self,
        user_id: i32,
        chat_id: &str,
        cursor: DateTime<Utc>,
    ) -> RepoResult<i64> {
        let query = async {
            sqlx::query_scalar::<_, i64>(
                r#"
                SELECT COUNT(*)
                FROM chat_message
                WHERE user_id = $1 AND chat_id = $2 AND created_at > $3
                "#,
            )
            .bind(user_id)
            .bind(chat_id)
            .bind(cursor.naive_utc())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
        };

        with_deadline(self.query_timeout, "count_messages_to_recipient_since", query).await
    }
}
