//! Reaction entity - a user's reaction to a message

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::json_timestamp;

/// Reaction entity
///
/// Reactions reach this layer nested inside an aggregated JSON array, so the
/// timestamps go through the strict JSON timestamp codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageReaction {
    pub user_id: i32,
    pub message_id: String,
    pub reaction: String,
    #[serde(with = "json_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "json_timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl MessageReaction {
    /// Check if the reaction was changed after it was first left
    #[inline]
    pub fn is_updated(&self) -> bool {
        self.updated_at > self.created_at
    }
}
