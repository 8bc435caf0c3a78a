//! In-memory repository doubles for service tests
//!
//! Mirrors the filtering and ordering of the PostgreSQL queries so service
//! logic can be exercised without a database.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use dm_core::entities::{ChatMember, ChatMessage, MessageReaction, MessageWithReactions};
use dm_core::traits::{ChatMessageRepository, MessageRateCounter, RepoResult};
use dm_core::{DomainError, MessagePageQuery};

#[derive(Default)]
pub struct InMemoryMessageStore {
    messages: RwLock<Vec<ChatMessage>>,
    members: RwLock<Vec<ChatMember>>,
    reactions: RwLock<Vec<MessageReaction>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_member(&self, member: ChatMember) {
        self.members.write().unwrap().push(member);
    }

    pub fn add_message(&self, chat_id: &str, message_id: &str, user_id: i32, created_at: DateTime<Utc>) {
        self.messages.write().unwrap().push(ChatMessage {
            message_id: message_id.to_string(),
            chat_id: chat_id.to_string(),
            user_id,
            created_at,
            ciphertext: format!("cipher-{message_id}"),
        });
    }

    pub fn add_reaction(&self, message_id: &str, user_id: i32, reaction: &str, at: DateTime<Utc>) {
        self.reactions.write().unwrap().push(MessageReaction {
            user_id,
            message_id: message_id.to_string(),
            reaction: reaction.to_string(),
            created_at: at,
            updated_at: at,
        });
    }
}

#[async_trait]
impl ChatMessageRepository for InMemoryMessageStore {
    async fn get_message(&self, chat_id: &str, message_id: &str) -> RepoResult<ChatMessage> {
        self.messages
            .read()
            .unwrap()
            .iter()
            .find(|m| m.chat_id == chat_id && m.message_id == message_id)
            .cloned()
            .ok_or_else(|| DomainError::message_not_found(chat_id, message_id))
    }

    async fn get_message_page(
        &self,
        user_id: i32,
        chat_id: &str,
        query: MessagePageQuery,
    ) -> RepoResult<Vec<MessageWithReactions>> {
        let members = self.members.read().unwrap();
        let Some(member) = members
            .iter()
            .find(|m| m.chat_id == chat_id && m.user_id == user_id)
        else {
            return Ok(Vec::new());
        };

        let mut visible: Vec<ChatMessage> = self
            .messages
            .read()
            .unwrap()
            .iter()
            .filter(|m| m.chat_id == chat_id && m.created_at < query.cursor() && member.can_see(m.created_at))
            .cloned()
            .collect();
        visible.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.message_id.cmp(&b.message_id))
        });
        visible.truncate(usize::try_from(query.limit()).unwrap_or(0));

        let reactions = self.reactions.read().unwrap();
        Ok(visible
            .into_iter()
            .map(|message| MessageWithReactions {
                reactions: reactions
                    .iter()
                    .filter(|r| r.message_id == message.message_id)
                    .cloned()
                    .collect(),
                message,
            })
            .collect())
    }
}

#[async_trait]
impl MessageRateCounter for InMemoryMessageStore {
    async fn count_messages_since(&self, user_id: i32, cursor: DateTime<Utc>) -> RepoResult<i64> {
        let count = self
            .messages
            .read()
            .unwrap()
            .iter()
            .filter(|m| m.user_id == user_id && m.created_at > cursor)
            .count();
        Ok(count as i64)
    }

    async fn count_messages_to_recipient_since(
        &self,
        user_id: i32,
        chat_id: &str,
        cursor: DateTime<Utc>,
    ) -> RepoResult<i64> {
        let count = self
            .messages
            .read()
            .unwrap()
            .iter()
            .filter(|m| m.user_id == user_id && m.chat_id == chat_id && m.created_at > cursor)
            .count();
        Ok(count as i64)
    }
}

/// Store whose every call fails, for checking propagation
pub struct FailingStore(pub fn() -> DomainError);

#[async_trait]
impl ChatMessageRepository for FailingStore {
    async fn get_message(&self, _chat_id: &str, _message_id: &str) -> RepoResult<ChatMessage> {
        Err((self.0)())
    }

    async fn get_message_page(
        &self,
        _user_id: i32,
        _chat_id: &str,
        _query: MessagePageQuery,
    ) -> RepoResult<Vec<MessageWithReactions>> {
        Err((self.0)())
    }
}

#[async_trait]
impl MessageRateCounter for FailingStore {
    async fn count_messages_since(&self, _user_id: i32, _cursor: DateTime<Utc>) -> RepoResult<i64> {
        Err((self.0)())
    }

    async fn count_messages_to_recipient_since(
        &self,
        _user_id: i32,
        _chat_id: &str,
        _cursor: DateTime<Utc>,
    ) -> RepoResult<i64> {
        Err((self.0)())
    }
}
