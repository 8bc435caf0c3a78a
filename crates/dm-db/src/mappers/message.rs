//! Chat message model -> entity mappers

use dm_core::entities::{ChatMessage, MessageWithReactions};
use dm_core::DomainError;

use crate::models::{ChatMessageModel, ChatMessageWithReactionsModel};

use super::reaction::decode_reactions;

/// Convert ChatMessageModel to ChatMessage entity
impl From<ChatMessageModel> for ChatMessage {
    fn from(model: ChatMessageModel) -> Self {
        ChatMessage {
            message_id: model.message_id,
            chat_id: model.chat_id,
            user_id: model.user_id,
            created_at: model.created_at.and_utc(),
            ciphertext: model.ciphertext,
        }
    }
}

/// Convert an aggregated history row, decoding its reaction array
impl TryFrom<ChatMessageWithReactionsModel> for MessageWithReactions {
    type Error = DomainError;

    fn try_from(model: ChatMessageWithReactionsModel) -> Result<Self, Self::Error> {
        let (message, reactions) = model.into_parts();
        let message = ChatMessage::from(message);
        let reactions = decode_reactions(reactions).map_err(|e| match e {
            DomainError::DecodeError(reason) => DomainError::DecodeError(format!(
                "reactions of message {} in chat {}: {reason}",
                message.message_id, message.chat_id
            )),
            other => other,
        })?;

        Ok(MessageWithReactions { message, reactions })
    }
}
