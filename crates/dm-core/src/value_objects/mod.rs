//! Value objects - immutable types that represent domain concepts

pub mod json_timestamp;
mod page_query;

pub use json_timestamp::TimestampDecodeError;
pub use page_query::MessagePageQuery;
