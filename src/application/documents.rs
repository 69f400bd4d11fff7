//! Helpers for list-shaped documents kept under a single store key.

use std::fmt::Display;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::ports::StorageError;

/// A decoded list plus the raw entries that failed to decode.
///
/// Skipped entries are written back untouched by [`encode_list`], so a
/// rewrite of the collection never drops stored data it could not read.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ListDocument<T> {
    pub items: Vec<T>,
    pub skipped: Vec<Value>,
}

impl<T> ListDocument<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            skipped: Vec::new(),
        }
    }
}

/// Decodes a stored list with serde, skipping entries that do not decode.
pub(crate) fn decode_list<T: DeserializeOwned>(
    key: &str,
    document: Option<Value>,
) -> Result<ListDocument<T>, StorageError> {
    decode_list_with(key, document, serde_json::from_value)
}

/// Decodes a stored list entry by entry with `decode`.
///
/// A missing document is an empty list. A document that is not an array
/// is an error. Entries `decode` rejects are logged and kept raw.
pub(crate) fn decode_list_with<T, E, F>(
    key: &str,
    document: Option<Value>,
    mut decode: F,
) -> Result<ListDocument<T>, StorageError>
where
    E: Display,
    F: FnMut(Value) -> Result<T, E>,
{
    let entries = match document {
        None => return Ok(ListDocument::new(Vec::new())),
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            return Err(StorageError::DeserializationFailed(format!(
                "document '{}' is not a list",
                key
            )))
        }
    };

    let mut decoded = ListDocument::new(Vec::with_capacity(entries.len()));
    for (index, entry) in entries.into_iter().enumerate() {
        match decode(entry.clone()) {
            Ok(item) => decoded.items.push(item),
            Err(e) => {
                warn!(key, index, error = %e, "skipping undecodable entry");
                decoded.skipped.push(entry);
            }
        }
    }
    Ok(decoded)
}

/// Encodes `items` followed by the raw entries skipped on load.
pub(crate) fn encode_list<T: Serialize>(
    items: &[T],
    skipped: &[Value],
) -> Result<Value, StorageError> {
    let mut entries = items
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| StorageError::SerializationFailed(e.to_string()))?;
    entries.extend(skipped.iter().cloned());
    Ok(Value::Array(entries))
}
