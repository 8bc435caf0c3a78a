//! Aggregated reaction decoding
//!
//! The history query folds each message's reactions into one `jsonb` array
//! (`COALESCE(jsonb_agg(..) FILTER (..), '[]')`), so a message with no reactions
//! arrives as `[]`. Each element's timestamps are strings that go through the
//! strict JSON timestamp codec via `MessageReaction`'s serde attributes.

use dm_core::entities::MessageReaction;
use dm_core::DomainError;
use serde_json::Value;
use tracing::warn;

/// Decode the aggregated reaction array of a single message row
///
/// A JSON `null` is treated like `[]` so callers always get a collection.
/// Anything else that is not an array of well-formed reactions is a decode error.
pub fn decode_reactions(value: Value) -> Result<Vec<MessageReaction>, DomainError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .map(|item| {
                serde_json::from_value(item).map_err(|e| {
                    warn!(error = %e, "Malformed reaction in aggregated row");
                    DomainError::DecodeError(e.to_string())
                })
            })
            .collect(),
        other => Err(DomainError::DecodeError(format!(
            "expected reaction array, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
