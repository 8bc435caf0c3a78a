//! Member entity - a user's membership in a chat

use chrono::{DateTime, Utc};

/// Chat member entity (junction between user and chat)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMember {
    pub chat_id: String,
    pub user_id: i32,
    /// Per-member visibility horizon; messages at or before it are hidden from this member
    pub cleared_history_at: Option<DateTime<Utc>>,
}

impl ChatMember {
    /// Create a new ChatMember with full history visible
    pub fn new(chat_id: impl Into<String>, user_id: i32) -> Self {
        Self {
            chat_id: chat_id.into(),
            user_id,
            cleared_history_at: None,
        }
    }

    /// Check if the member has cleared their history
    #[inline]
    pub fn has_cleared_history(&self) -> bool {
        self.cleared_history_at.is_some()
    }

    /// Check if a message created at `created_at` is visible to this member
    pub fn can_see(&self, created_at: DateTime<Utc>) -> bool {
        self.cleared_history_at
            .is_none_or(|cleared| created_at > cleared)
    }
}
