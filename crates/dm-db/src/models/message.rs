//! Chat message database models

use chrono::NaiveDateTime;
use sqlx::types::JsonValue;
use sqlx::FromRow;

/// Database model for the chat_message table
#[derive(Debug, Clone, FromRow)]
pub struct ChatMessageModel {
    pub message_id: String,
    pub chat_id: String,
    pub user_id: i32,
    pub created_at: NaiveDateTime,
    pub ciphertext: String,
}

/// A chat_message row joined with its reactions aggregated by `jsonb_agg`
///
/// `reactions` is left as raw JSON: the driver does not decode timestamps nested
/// inside it, so the mapper runs it through the strict JSON timestamp codec.
#[derive(Debug, Clone, FromRow)]
pub struct ChatMessageWithReactionsModel {
    pub message_id: String,
    pub chat_id: String,
    pub user_id: i32,
    pub created_at: NaiveDateTime,
    pub ciphertext: String,
    pub reactions: JsonValue,
}

impl ChatMessageWithReactionsModel {
    /// Split off the plain message columns
    pub fn into_parts(self) -> (ChatMessageModel, JsonValue) {
        (
            ChatMessageModel {
                message_id: self.message_id,
                chat_id: self.chat_id,
                user_id: self.user_id,
                created_at: self.created_at,
                ciphertext: self.ciphertext,
            },
            self.reactions,
        )
    }
}
