//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Both traits are read-only: messages, members,
//! and reactions are written by collaborators outside this workspace.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{ChatMessage, MessageWithReactions};
use crate::error::DomainError;
use crate::value_objects::MessagePageQuery;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Chat Message Repository
// ============================================================================

#[async_trait]
pub trait ChatMessageRepository: Send + Sync {
    /// Find a message by its composite key
    ///
    /// Fails with `DomainError::MessageNotFound` when no row matches.
    async fn get_message(&self, chat_id: &str, message_id: &str) -> RepoResult<ChatMessage>;

    /// List a page of messages visible to `user_id`, newest first, each with its reactions
    ///
    /// Only messages with `created_at < query.cursor()` are returned, and only when the user
    /// is a member of the chat. Messages at or before the member's `cleared_history_at`
    /// are hidden. Ties on `created_at` are ordered by message id ascending.
    async fn get_message_page(
        &self,
        user_id: i32,
        chat_id: &str,
        query: MessagePageQuery,
    ) -> RepoResult<Vec<MessageWithReactions>>;
}

// ============================================================================
// Message Rate Counter
// ============================================================================

#[async_trait]
pub trait MessageRateCounter: Send + Sync {
    /// Count messages sent by `user_id` after `cursor`, across every chat
    async fn count_messages_since(&self, user_id: i32, cursor: DateTime<Utc>) -> RepoResult<i64>;

    /// Count messages sent by `user_id` into `chat_id` after `cursor`
    async fn count_messages_to_recipient_since(
        &self,
        user_id: i32,
        chat_id: &str,
        cursor: DateTime<Utc>,
    ) -> RepoResult<i64>;
}
