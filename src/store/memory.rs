//! In-memory durable store.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::StoreError;
use crate::store::DurableStore;

// == Memory Store ==
/// Map-backed store. With a quota it rejects writes of new keys once full,
/// the way a browser-style storage area reports "quota exceeded".
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store accepting at most `max_items` keys.
    pub fn with_quota(max_items: usize) -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
            quota: Some(max_items),
        }
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl DurableStore for MemoryStore {
    fn get(&self, raw_key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.read().get(raw_key).cloned())
    }

    fn set(&self, raw_key: &str, value: &str) -> Result<(), StoreError> {
        let mut items = self.items.write();
        if let Some(quota) = self.quota {
            if !items.contains_key(raw_key) && items.len() >= quota {
                return Err(StoreError::WriteFailed {
                    key: raw_key.to_string(),
                    reason: format!("quota of {} items exceeded", quota),
                });
            }
        }
        items.insert(raw_key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, raw_key: &str) -> Result<(), StoreError> {
        self.items.write().remove(raw_key);
        Ok(())
    }

    fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .items
            .read()
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }
}
