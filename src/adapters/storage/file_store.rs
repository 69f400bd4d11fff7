//! File-based Store Adapter
//!
//! Stores each document as one file under a base directory, encoded as
//! JSON or YAML. The file name is the key plus the format's extension.

use async_trait::async_trait;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::config::StorageFormat;
use crate::ports::{validate_key, KeyValueStore, StorageError};

/// File-based document store
#[derive(Debug, Clone)]
pub struct FileStore {
    base_path: PathBuf,
    format: StorageFormat,
}

impl FileStore {
    /// Create a file store rooted at `base_path`
    ///
    /// # Example
    /// ```ignore
    /// let store = FileStore::new("./data", StorageFormat::Json);
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P, format: StorageFormat) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            format,
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Get the file path for a key
    fn file_path(&self, key: &str) -> PathBuf {
        self.base_path
            .join(format!("{}.{}", key, self.format.extension()))
    }

    fn encode(&self, value: &Value) -> Result<String, StorageError> {
        match self.format {
            StorageFormat::Json => serde_json::to_string_pretty(value)
                .map_err(|e| StorageError::SerializationFailed(e.to_string())),
            StorageFormat::Yaml => serde_yaml::to_string(value)
                .map_err(|e| StorageError::SerializationFailed(e.to_string())),
        }
    }

    fn decode(&self, contents: &str) -> Result<Value, StorageError> {
        match self.format {
            StorageFormat::Json => serde_json::from_str(contents)
                .map_err(|e| StorageError::DeserializationFailed(e.to_string())),
            StorageFormat::Yaml => serde_yaml::from_str(contents)
                .map_err(|e| StorageError::DeserializationFailed(e.to_string())),
        }
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn load(&self, key: &str) -> Result<Option<Value>, StorageError> {
        validate_key(key)?;
        let file_path = self.file_path(key);

        let contents = match fs::read_to_string(&file_path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::IoError(e.to_string())),
        };

        debug!(path = %file_path.display(), "loaded document");
        self.decode(&contents).map(Some)
    }

    async fn save(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        validate_key(key)?;
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?;

        let file_path = self.file_path(key);
        let contents = self.encode(value)?;

        fs::write(&file_path, contents)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?;

        debug!(path = %file_path.display(), "saved document");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        match fs::remove_file(self.file_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::IoError(e.to_string())),
        }
    }
}
