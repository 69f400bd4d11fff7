//! Key-Value Store Port - Interface for persisting JSON documents by key.
//!
//! The registry and catalog keep their whole collection under a single key
//! and rewrite it on every mutation, so the port only needs whole-document
//! load, save, and delete.

use async_trait::async_trait;
use serde_json::Value;

/// Errors that can occur during storage operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid storage key '{0}': use letters, digits, '-' or '_'")]
    InvalidKey(String),

    #[error("Failed to serialize document: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize document: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for loading and saving JSON documents.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Load the document stored under `key`.
    ///
    /// # Returns
    /// `None` if nothing has been saved under the key.
    async fn load(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Save a document, replacing any previous value.
    async fn save(&self, key: &str, value: &Value) -> Result<(), StorageError>;

    /// Delete the document. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Check whether a document exists under `key`.
    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.load(key).await?.is_some())
    }
}

/// Validates a storage key.
///
/// Keys double as file names in the file adapter, so only a conservative
/// character set is accepted.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
