//! Durable Tier Module
//!
//! Store-backed tier. Keys are namespaced with a fixed prefix and values are
//! `CacheEntry` envelopes encoded as JSON text. Every store failure is
//! logged and degrades to a miss.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::{current_timestamp_ms, CacheEntry, Tier, TierKind};
use crate::error::StoreError;
use crate::store::DurableStore;

// == Durable Tier ==
pub struct DurableTier {
    store: Arc<dyn DurableStore>,
    prefix: String,
    default_ttl: Duration,
}

impl DurableTier {
    pub fn new(store: Arc<dyn DurableStore>, prefix: impl Into<String>, default_ttl: Duration) -> Self {
        Self {
            store,
            prefix: prefix.into(),
            default_ttl,
        }
    }

    fn raw_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// Reads and decodes an envelope. Expired entries are returned as-is.
    fn load(&self, raw_key: &str) -> Result<Option<CacheEntry>, StoreError> {
        let Some(text) = self.store.get(raw_key)? else {
            return Ok(None);
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| StoreError::ReadFailed {
                key: raw_key.to_string(),
                reason: e.to_string(),
            })
    }

    fn delete_raw(&self, raw_key: &str) {
        if let Err(e) = self.store.delete(raw_key) {
            warn!(error = %e, "durable delete failed");
        }
    }

    fn prefixed_keys(&self) -> Vec<String> {
        self.store.list_keys(&self.prefix).unwrap_or_else(|e| {
            warn!(error = %e, "durable key listing failed");
            Vec::new()
        })
    }
}

impl Tier for DurableTier {
    fn kind(&self) -> TierKind {
        TierKind::Durable
    }

    fn lookup(&mut self, key: &str) -> Option<Value> {
        let raw_key = self.raw_key(key);
        match self.load(&raw_key) {
            Ok(Some(entry)) if entry.is_expired() => {
                self.delete_raw(&raw_key);
                None
            }
            Ok(Some(entry)) => Some(entry.data),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "dropping unreadable durable entry");
                self.delete_raw(&raw_key);
                None
            }
        }
    }

    fn store(&mut self, key: &str, data: Value, ttl: Option<Duration>) -> Option<String> {
        let raw_key = self.raw_key(key);
        let entry = CacheEntry::new(data, ttl.unwrap_or(self.default_ttl));

        let text = match serde_json::to_string(&entry) {
            Ok(text) => text,
            Err(e) => {
                warn!(key, error = %e, "could not encode durable entry");
                return None;
            }
        };

        // Best effort: reclaim space but do not retry the write. A previous
        // value must not outlive the write that replaced it.
        if let Err(e) = self.store.set(&raw_key, &text) {
            warn!(error = %e, "durable write failed, sweeping expired entries");
            self.delete_raw(&raw_key);
            self.sweep();
        }
        None
    }

    fn contains(&self, key: &str) -> bool {
        matches!(self.load(&self.raw_key(key)), Ok(Some(entry)) if !entry.is_expired())
    }

    fn remove(&mut self, key: &str) {
        self.delete_raw(&self.raw_key(key));
    }

    fn remove_matching(&mut self, fragment: &str) -> usize {
        let matching: Vec<String> = self
            .prefixed_keys()
            .into_iter()
            .filter(|raw| {
                raw.strip_prefix(&self.prefix)
                    .map(|key| key.contains(fragment))
                    .unwrap_or(false)
            })
            .collect();

        for raw_key in &matching {
            self.delete_raw(raw_key);
        }
        matching.len()
    }

    fn clear(&mut self) {
        for raw_key in self.prefixed_keys() {
            self.delete_raw(&raw_key);
        }
    }

    fn sweep(&mut self) -> usize {
        let now = current_timestamp_ms();
        let mut removed = 0;

        for raw_key in self.prefixed_keys() {
            let stale = match self.load(&raw_key) {
                Ok(Some(entry)) => entry.is_expired_at(now),
                Ok(None) => false,
                Err(e) => {
                    debug!(error = %e, "sweeping unreadable durable entry");
                    true
                }
            };
            if stale {
                self.delete_raw(&raw_key);
                removed += 1;
            }
        }
        removed
    }

    /// Stored entries, including expired ones not yet swept.
    fn len(&self) -> usize {
        self.prefixed_keys().len()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;
    use std::thread::sleep;

    const PREFIX: &str = "pokemon_cache_";

    fn tier_with(store: Arc<MemoryStore>) -> DurableTier {
        DurableTier::new(store, PREFIX, Duration::from_secs(1800))
    }

    #[test]
    fn test_store_writes_prefixed_envelope() {
        let store = Arc::new(MemoryStore::new());
        let mut tier = tier_with(store.clone());

        tier.store("pikachu", json!({"id": 25}), None);

        let text = store.get("pokemon_cache_pikachu").unwrap().unwrap();
        let entry: CacheEntry = serde_json::from_str(&text).unwrap();
        assert_eq!(entry.data, json!({"id": 25}));
        assert_eq!(entry.expires_at - entry.created_at, 1_800_000);
    }

    #[test]
    fn test_caller_ttl_used_in_full() {
        let store = Arc::new(MemoryStore::new());
        let mut tier = tier_with(store.clone());

        tier.store("k", json!(1), Some(Duration::from_secs(7200)));

        let text = store.get("pokemon_cache_k").unwrap().unwrap();
        let entry: CacheEntry = serde_json::from_str(&text).unwrap();
        assert_eq!(entry.expires_at - entry.created_at, 7_200_000);
    }

    #[test]
    fn test_lookup_roundtrip() {
        let mut tier = tier_with(Arc::new(MemoryStore::new()));
        tier.store("k", json!("v"), None);

        assert_eq!(tier.lookup("k"), Some(json!("v")));
        assert!(tier.contains("k"));
    }

    #[test]
    fn test_corrupt_entry_is_absent_and_deleted() {
        let store = Arc::new(MemoryStore::new());
        store.set("pokemon_cache_bad", "{not json").unwrap();
        let mut tier = tier_with(store.clone());

        assert!(!tier.contains("bad"));
        assert!(tier.lookup("bad").is_none());
        assert_eq!(store.get("pokemon_cache_bad").unwrap(), None);
    }

    #[test]
    fn test_expired_entry_is_absent() {
        let store = Arc::new(MemoryStore::new());
        let mut tier = tier_with(store.clone());
        tier.store("k", json!(1), Some(Duration::from_millis(20)));

        sleep(Duration::from_millis(40));

        assert!(tier.lookup("k").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_write_failure_is_swallowed_and_sweeps() {
        let store = Arc::new(MemoryStore::with_quota(1));
        let mut tier = tier_with(store.clone());

        tier.store("old", json!(1), Some(Duration::from_millis(20)));
        sleep(Duration::from_millis(40));

        // Rejected by the quota, which triggers a sweep of "old"
        assert!(tier.store("new", json!(2), None).is_none());
        assert!(store.is_empty());
        assert!(tier.lookup("new").is_none());
    }

    #[test]
    fn test_remove_matching_ignores_foreign_keys() {
        let store = Arc::new(MemoryStore::new());
        store.set("someone_else_a1", "x").unwrap();
        let mut tier = tier_with(store.clone());
        tier.store("a1", json!(1), None);
        tier.store("a2", json!(2), None);
        tier.store("b1", json!(3), None);

        assert_eq!(tier.remove_matching("a"), 2);
        assert!(tier.contains("b1"));
        assert!(store.get("someone_else_a1").unwrap().is_some());
    }

    #[test]
    fn test_clear_keeps_foreign_keys() {
        let store = Arc::new(MemoryStore::new());
        store.set("unrelated", "x").unwrap();
        let mut tier = tier_with(store.clone());
        tier.store("k", json!(1), None);

        tier.clear();

        assert!(tier.is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_sweep_removes_expired_and_corrupt() {
        let store = Arc::new(MemoryStore::new());
        let mut tier = tier_with(store.clone());
        tier.store("short", json!(1), Some(Duration::from_millis(20)));
        tier.store("long", json!(2), None);
        store.set("pokemon_cache_garbage", "???").unwrap();

        sleep(Duration::from_millis(40));

        assert_eq!(tier.sweep(), 2);
        assert_eq!(tier.len(), 1);
        assert!(tier.contains("long"));
    }
}
