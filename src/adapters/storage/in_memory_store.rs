//! In-Memory Store Adapter
//!
//! Keeps documents in a shared map. Used in tests and when no storage
//! directory is configured.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{validate_key, KeyValueStore, StorageError};

/// In-memory document store
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    documents: Arc<RwLock<HashMap<String, Value>>>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored documents (useful for tests)
    pub async fn clear(&self) {
        self.documents.write().await.clear();
    }

    /// Number of stored documents
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn load(&self, key: &str) -> Result<Option<Value>, StorageError> {
        validate_key(key)?;
        Ok(self.documents.read().await.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        validate_key(key)?;
        self.documents
            .write()
            .await
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.documents.write().await.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        validate_key(key)?;
        Ok(self.documents.read().await.contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_memory_store_save_and_load() {
        let store = InMemoryStore::new();
        let doc = json!([{ "name": "Soup" }]);

        store.save("recipes", &doc).await.unwrap();

        assert_eq!(store.load("recipes").await.unwrap(), Some(doc));
    }

    #[tokio::test]
    async fn test_memory_store_load_missing_returns_none() {
        let store = InMemoryStore::new();
        assert_eq!(store.load("recipes").await.unwrap(), None);
        assert!(!store.exists("recipes").await.unwrap());
    }

    #[tokio::test]
    async fn test_memory_store_save_overwrites() {
        let store = InMemoryStore::new();
        store.save("recipes", &json!([1])).await.unwrap();
        store.save("recipes", &json!([2])).await.unwrap();

        assert_eq!(store.load("recipes").await.unwrap(), Some(json!([2])));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_memory_store_delete() {
        let store = InMemoryStore::new();
        store.save("recipes", &json!([])).await.unwrap();

        store.delete("recipes").await.unwrap();
        store.delete("recipes").await.unwrap();

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_memory_store_rejects_bad_keys() {
        let store = InMemoryStore::new();
        let result = store.save("../escape", &json!(null)).await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_memory_store_clones_share_state() {
        let store = InMemoryStore::new();
        let other = store.clone();

        store.save("products", &json!({ "a": 1 })).await.unwrap();

        assert!(other.exists("products").await.unwrap());
        other.clear().await;
        assert!(store.is_empty().await);
    }
}
