//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Document stores (in-memory, file)

pub mod storage;

pub use storage::{store_from_config, FileStore, InMemoryStore};
