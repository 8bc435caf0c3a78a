//! Domain entities - core business objects

mod member;
mod message;
mod reaction;

pub use member::ChatMember;
pub use message::{ChatMessage, MessageWithReactions};
pub use reaction::MessageReaction;
