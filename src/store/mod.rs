//! Durable Store Module
//!
//! String-only key/value adapters backing the durable cache tier.
//!
//! # Adapters
//! - `MemoryStore`: in-process map with an optional write quota
//! - `FileStore`: one JSON file per key in a cache directory

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StoreError;

// == Durable Store Trait ==
/// Contract of a local key/value store holding text values.
///
/// Implementations use interior mutability so one store can be shared
/// between the cache engine and operational tooling.
pub trait DurableStore: Send + Sync {
    /// Reads a raw key. `Ok(None)` when the key is absent.
    fn get(&self, raw_key: &str) -> Result<Option<String>, StoreError>;

    /// Writes a raw key, replacing any previous value.
    fn set(&self, raw_key: &str, value: &str) -> Result<(), StoreError>;

    /// Deletes a raw key. Deleting a missing key succeeds.
    fn delete(&self, raw_key: &str) -> Result<(), StoreError>;

    /// Lists every raw key starting with `prefix`.
    fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StoreError>;
}
