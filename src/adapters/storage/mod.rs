//! Storage Adapters
//!
//! Implementations of the KeyValueStore port.
//!
//! ## Available Adapters
//!
//! - **FileStore** - One JSON or YAML file per key
//! - **InMemoryStore** - Shared in-memory map (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileStore, InMemoryStore};
//!
//! // Production: file-based storage
//! let store = FileStore::new("./data", StorageFormat::Json);
//!
//! // Testing: in-memory storage
//! let store = InMemoryStore::new();
//! ```

mod file_store;
mod in_memory_store;

pub use file_store::FileStore;
pub use in_memory_store::InMemoryStore;

use std::sync::Arc;
use tracing::info;

use crate::config::{StorageBackend, StorageConfig};
use crate::ports::KeyValueStore;

/// Build the store selected by configuration.
pub fn store_from_config(config: &StorageConfig) -> Arc<dyn KeyValueStore> {
    match config.backend {
        StorageBackend::Memory => {
            info!("using in-memory storage");
            Arc::new(InMemoryStore::new())
        }
        StorageBackend::File => {
            info!(path = %config.path.display(), format = ?config.format, "using file storage");
            Arc::new(FileStore::new(&config.path, config.format))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageFormat;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn memory_backend_starts_empty() {
        let store = store_from_config(&StorageConfig::default());
        assert_eq!(store.load("recipes").await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_backend_writes_under_configured_path() {
        let dir = TempDir::new().unwrap();
        let config = StorageConfig {
            backend: StorageBackend::File,
            path: dir.path().to_path_buf(),
            format: StorageFormat::Yaml,
        };

        let store = store_from_config(&config);
        store.save("products", &json!([])).await.unwrap();

        assert!(dir.path().join("products.yaml").exists());
    }
}
