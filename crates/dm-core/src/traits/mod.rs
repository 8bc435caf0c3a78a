//! Repository traits (ports)

mod repositories;

pub use repositories::{ChatMessageRepository, MessageRateCounter, RepoResult};
