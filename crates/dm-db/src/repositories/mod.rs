//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in dm-core.

mod deadline;
mod error;
mod message;

pub use deadline::with_deadline;
pub use error::map_db_error;
pub use message::PgChatMessageRepository;
