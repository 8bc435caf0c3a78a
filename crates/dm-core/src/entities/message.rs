//! Message entity - an encrypted direct message and its reactions

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::reaction::MessageReaction;

/// Chat message entity
///
/// Identified by `(chat_id, message_id)`; the message id is only unique within its chat.
/// The ciphertext is opaque to this layer and never decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub message_id: String,
    pub chat_id: String,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub ciphertext: String,
}

impl ChatMessage {
    /// Check if the message was sent by the given user
    #[inline]
    pub fn is_authored_by(&self, user_id: i32) -> bool {
        self.user_id == user_id
    }
}

/// A message joined with every reaction attached to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageWithReactions {
    pub message: ChatMessage,
    /// Always present; empty when the message has no reactions. Unordered.
    pub reactions: Vec<MessageReaction>,
}

impl MessageWithReactions {
    /// Create a message with no reactions
    pub fn without_reactions(message: ChatMessage) -> Self {
        Self {
            message,
            reactions: Vec::new(),
        }
    }

    /// Check if anyone reacted to this message
    #[inline]
    pub fn has_reactions(&self) -> bool {
        !self.reactions.is_empty()
    }

    /// Get the reaction left by a specific user, if any
    pub fn reaction_by(&self, user_id: i32) -> Option<&MessageReaction> {
        self.reactions.iter().find(|r| r.user_id == user_id)
    }

    /// Count reactions grouped by reaction symbol
    pub fn reaction_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for reaction in &self.reactions {
            *counts.entry(reaction.reaction.as_str()).or_insert(0) += 1;
        }
        counts
    }
}
