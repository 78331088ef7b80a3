//! Fast Tier Module
//!
//! Bounded in-process tier with FIFO eviction and a short default TTL.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

use crate::cache::{current_timestamp_ms, CacheEntry, InsertionOrder, Tier, TierKind};

// == Fast Tier ==
#[derive(Debug)]
pub struct FastTier {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Insertion order for eviction
    order: InsertionOrder,
    /// Maximum number of entries
    max_items: usize,
    /// TTL ceiling for every entry in this tier
    default_ttl: Duration,
}

impl FastTier {
    // == Constructor ==
    /// Creates a new FastTier.
    ///
    /// # Arguments
    /// * `max_items` - Maximum number of entries the tier can hold
    /// * `default_ttl` - Default TTL, also the upper bound for caller TTLs
    pub fn new(max_items: usize, default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            max_items,
            default_ttl,
        }
    }

    pub fn capacity(&self) -> usize {
        self.max_items
    }

    /// TTL applied for a caller-requested TTL: never longer than the default.
    pub fn effective_ttl(&self, requested: Option<Duration>) -> Duration {
        requested
            .map(|ttl| ttl.min(self.default_ttl))
            .unwrap_or(self.default_ttl)
    }

    /// Entry for `key` including expired ones.
    pub fn entry(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    fn delete(&mut self, key: &str) -> bool {
        self.order.remove(key);
        self.entries.remove(key).is_some()
    }
}

impl Tier for FastTier {
    fn kind(&self) -> TierKind {
        TierKind::Fast
    }

    fn lookup(&mut self, key: &str) -> Option<Value> {
        let entry = self.entries.get(key)?;
        if entry.is_expired() {
            self.delete(key);
            return None;
        }
        Some(entry.data.clone())
    }

    fn store(&mut self, key: &str, data: Value, ttl: Option<Duration>) -> Option<String> {
        if self.max_items == 0 {
            return None;
        }

        // Expired entries give up their slots before any live key is evicted
        let is_new = !self.entries.contains_key(key);
        if is_new && self.entries.len() >= self.max_items {
            self.sweep();
        }

        // Evict oldest insertion when a new key would exceed the bound
        let mut evicted = None;
        if is_new && self.entries.len() >= self.max_items {
            if let Some(oldest) = self.order.evict_oldest() {
                self.entries.remove(&oldest);
                evicted = Some(oldest);
            }
        }

        let entry = CacheEntry::new(data, self.effective_ttl(ttl));
        self.entries.insert(key.to_string(), entry);
        self.order.record(key);

        evicted
    }

    fn contains(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .map(|entry| !entry.is_expired())
            .unwrap_or(false)
    }

    fn remove(&mut self, key: &str) {
        self.delete(key);
    }

    fn remove_matching(&mut self, fragment: &str) -> usize {
        let matching: Vec<String> = self
            .entries
            .keys()
            .filter(|key| key.contains(fragment))
            .cloned()
            .collect();

        for key in &matching {
            self.delete(key);
        }
        matching.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn sweep(&mut self) -> usize {
        let now = current_timestamp_ms();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.delete(key);
        }
        expired_keys.len()
    }

    /// Live entries only.
    fn len(&self) -> usize {
        let now = current_timestamp_ms();
        self.entries
            .values()
            .filter(|entry| !entry.is_expired_at(now))
            .count()
    }
}
