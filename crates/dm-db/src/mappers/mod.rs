//! Model to entity mappers
//!
//! - `From<Model> for Entity` for rows the driver fully decodes
//! - `TryFrom<Model> for Entity` where a JSON column still has to be decoded

mod message;
mod reaction;

pub use reaction::decode_reactions;
