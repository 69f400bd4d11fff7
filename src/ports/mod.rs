//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `KeyValueStore` - Persistence of whole JSON documents by key

mod key_value_store;

pub use key_value_store::{validate_key, KeyValueStore, StorageError};
