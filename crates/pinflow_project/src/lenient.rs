//! Tolerant deserializers for hand-edited project documents
//!
//! A malformed sub-map degrades to an empty map and a malformed entry is
//! dropped, so one bad record never rejects the whole document.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a keyed collection, skipping entries that fail to decode
pub(crate) fn map<'de, D, T>(deserializer: D) -> Result<IndexMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let entries = match value {
        Value::Object(entries) => entries,
        Value::Null => return Ok(IndexMap::new()),
        other => {
            log::warn!("Expected an object, found {}; using an empty map", kind(&other));
            return Ok(IndexMap::new());
        }
    };

    Ok(entries
        .into_iter()
        .filter_map(|(key, entry)| match serde_json::from_value(entry) {
            Ok(item) => Some((key, item)),
            Err(e) => {
                log::warn!("Skipping malformed entry '{}': {}", key, e);
                None
            }
        })
        .collect())
}

/// Deserialize an id or key, accepting numbers as their decimal text
pub(crate) fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Null => None,
        other => {
            log::warn!("Expected a string id, found {}; ignoring it", kind(&other));
            None
        }
    })
}

/// Deserialize a link endpoint list, keeping positions of non-string ids
pub(crate) fn endpoints<'de, D>(deserializer: D) -> Result<Vec<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let items = match value {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };

    Ok(items
        .into_iter()
        .map(|item| match item {
            Value::String(id) => Some(id),
            _ => None,
        })
        .collect())
}

/// Article and name of a JSON value's kind, for messages
pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
