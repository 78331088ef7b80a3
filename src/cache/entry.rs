//! Cache Entry Module
//!
//! Timestamped envelope shared by both tiers. The durable tier stores it as
//! JSON text, so field names are part of the on-disk format.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// == Cache Entry ==
/// A cached value with its creation and expiration timestamps.
///
/// Entries are never mutated after creation; updating a key replaces the
/// entry wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry<T = Value> {
    /// The stored value
    pub data: T,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds), always > created_at
    pub expires_at: u64,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates a new entry expiring `ttl` from now.
    ///
    /// A zero TTL is rounded up to one millisecond so that
    /// `expires_at > created_at` always holds.
    pub fn new(data: T, ttl: Duration) -> Self {
        let now = current_timestamp_ms();
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1);

        Self {
            data,
            created_at: now,
            expires_at: now.saturating_add(ttl_ms),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is live while `now <= expires_at` and expired strictly after.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Expiration check against an explicit clock reading.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        now_ms > self.expires_at
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::thread::sleep;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("test_value".to_string(), Duration::from_secs(60));

        assert_eq!(entry.data, "test_value");
        assert!(entry.expires_at > entry.created_at);
        assert_eq!(entry.expires_at - entry.created_at, 60_000);
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_zero_ttl_still_orders_timestamps() {
        let entry = CacheEntry::new(1, Duration::ZERO);
        assert!(entry.expires_at > entry.created_at);
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new("test_value", Duration::from_millis(20));

        assert!(!entry.is_expired());

        sleep(Duration::from_millis(40));

        assert!(entry.is_expired());
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let entry = CacheEntry::new(1, Duration::MAX);

        assert_eq!(entry.expires_at, u64::MAX);
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry {
            data: "test",
            created_at: 1_000,
            expires_at: 2_000,
        };

        // Still live at exactly expires_at, gone one millisecond later
        assert!(!entry.is_expired_at(2_000));
        assert!(entry.is_expired_at(2_001));
    }

    #[test]
    fn test_envelope_field_names() {
        let entry = CacheEntry {
            data: json!({"name": "pikachu"}),
            created_at: 1,
            expires_at: 2,
        };
        let text = serde_json::to_string(&entry).unwrap();
        assert!(text.contains("\"createdAt\":1"));
        assert!(text.contains("\"expiresAt\":2"));

        let parsed: CacheEntry = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, entry);
    }
}
