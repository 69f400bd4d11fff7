//! Storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where recipes, products and history are persisted
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Storage backend
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for the file backend
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Document encoding for the file backend
    #[serde(default)]
    pub format: StorageFormat,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageFormat {
    #[default]
    Json,
    Yaml,
}

impl StorageFormat {
    /// File extension used for documents in this format
    pub fn extension(&self) -> &'static str {
        match self {
            StorageFormat::Json => "json",
            StorageFormat::Yaml => "yaml",
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == StorageBackend::File && self.path.as_os_str().is_empty() {
            return Err(ValidationError::MissingStoragePath);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_path(),
            format: StorageFormat::default(),
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from("./data")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_memory_backend() {
        let config = StorageConfig::default();
        assert_eq!(config.backend, StorageBackend::Memory);
        assert_eq!(config.format, StorageFormat::Json);
        assert_eq!(config.path, PathBuf::from("./data"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_backend_requires_path() {
        let config = StorageConfig {
            backend: StorageBackend::File,
            path: PathBuf::new(),
            format: StorageFormat::Yaml,
        };
        assert_eq!(config.validate(), Err(ValidationError::MissingStoragePath));
    }

    #[test]
    fn memory_backend_ignores_empty_path() {
        let config = StorageConfig {
            path: PathBuf::new(),
            ..StorageConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn format_extensions() {
        assert_eq!(StorageFormat::Json.extension(), "json");
        assert_eq!(StorageFormat::Yaml.extension(), "yaml");
    }
}
