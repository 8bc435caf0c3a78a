//! Database models - SQLx-compatible structs for PostgreSQL rows

mod message;

pub use message::{ChatMessageModel, ChatMessageWithReactionsModel};
