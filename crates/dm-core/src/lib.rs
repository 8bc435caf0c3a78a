//! # dm-core
//!
//! Domain layer for the direct-message read path: entities, value objects,
//! repository traits, and the domain error type.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{ChatMember, ChatMessage, MessageReaction, MessageWithReactions};
pub use error::DomainError;
pub use traits::{ChatMessageRepository, MessageRateCounter, RepoResult};
pub use value_objects::{json_timestamp, MessagePageQuery, TimestampDecodeError};
