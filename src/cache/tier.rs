//! Tier Chain Module
//!
//! A lookup walks the tiers front to back. A hit in a lower tier is copied
//! into every tier in front of it (promotion), so the front tier is always a
//! derived copy of the ones behind it.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::cache::TierSummary;

// == Tier Kind ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TierKind {
    /// Bounded, in-process, short TTL
    Fast,
    /// Store-backed, longer TTL
    Durable,
}

// == Tier Trait ==
/// One storage layer of the cache.
///
/// Tier operations never fail: a layer that cannot serve a request behaves
/// as if the entry were absent.
pub trait Tier: Send + Sync {
    fn kind(&self) -> TierKind;

    /// Returns the live value for `key`. Expired entries are absent.
    fn lookup(&mut self, key: &str) -> Option<Value>;

    /// Stores `data` under `key`. `ttl = None` selects the tier default.
    ///
    /// Returns the key evicted to make room, if any.
    fn store(&mut self, key: &str, data: Value, ttl: Option<Duration>) -> Option<String>;

    /// Live presence check without side effects.
    fn contains(&self, key: &str) -> bool;

    fn remove(&mut self, key: &str);

    /// Removes every key containing `fragment`. Returns the number removed.
    fn remove_matching(&mut self, fragment: &str) -> usize;

    fn clear(&mut self);

    /// Physically removes expired entries. Returns the number removed.
    fn sweep(&mut self) -> usize;

    /// Number of entries currently held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// == Chain Hit ==
#[derive(Debug, Clone, PartialEq)]
pub struct ChainHit {
    pub value: Value,
    /// Tier that answered the lookup
    pub tier: TierKind,
    /// Keys evicted while promoting
    pub evicted: Vec<String>,
}

// == Tier Chain ==
/// Ordered tiers, fastest first.
pub struct TierChain {
    tiers: Vec<Box<dyn Tier>>,
}

impl TierChain {
    pub fn new(tiers: Vec<Box<dyn Tier>>) -> Self {
        Self { tiers }
    }

    // == Lookup ==
    /// Finds the first tier holding a live entry and promotes it forward.
    pub fn lookup(&mut self, key: &str) -> Option<ChainHit> {
        let (index, value) = self
            .tiers
            .iter_mut()
            .enumerate()
            .find_map(|(i, tier)| tier.lookup(key).map(|v| (i, v)))?;

        let evicted = self.tiers[..index]
            .iter_mut()
            .filter_map(|tier| tier.store(key, value.clone(), None))
            .collect();

        Some(ChainHit {
            value,
            tier: self.tiers[index].kind(),
            evicted,
        })
    }

    // == Store ==
    /// Writes to every tier. Returns keys evicted along the way.
    pub fn store(&mut self, key: &str, data: Value, ttl: Option<Duration>) -> Vec<String> {
        self.tiers
            .iter_mut()
            .filter_map(|tier| tier.store(key, data.clone(), ttl))
            .collect()
    }

    pub fn remove(&mut self, key: &str) {
        for tier in &mut self.tiers {
            tier.remove(key);
        }
    }

    pub fn remove_matching(&mut self, fragment: &str) -> usize {
        self.tiers
            .iter_mut()
            .map(|tier| tier.remove_matching(fragment))
            .sum()
    }

    pub fn clear(&mut self) {
        for tier in &mut self.tiers {
            tier.clear();
        }
    }

    /// Sweeps every tier, returning removals per tier.
    pub fn sweep(&mut self) -> Vec<(TierKind, usize)> {
        self.tiers
            .iter_mut()
            .map(|tier| (tier.kind(), tier.sweep()))
            .collect()
    }

    pub fn summaries(&self) -> Vec<TierSummary> {
        self.tiers
            .iter()
            .map(|tier| TierSummary {
                tier: tier.kind(),
                entries: tier.len(),
            })
            .collect()
    }

    pub fn tier(&self, kind: TierKind) -> Option<&dyn Tier> {
        self.tiers
            .iter()
            .find(|tier| tier.kind() == kind)
            .map(|tier| tier.as_ref())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::FastTier;
    use serde_json::json;

    fn chain_of_two_fast() -> TierChain {
        // A second bounded tier stands in for a slower layer
        struct Slow(FastTier);

        impl Tier for Slow {
            fn kind(&self) -> TierKind {
                TierKind::Durable
            }
            fn lookup(&mut self, key: &str) -> Option<Value> {
                self.0.lookup(key)
            }
            fn store(&mut self, key: &str, data: Value, ttl: Option<Duration>) -> Option<String> {
                self.0.store(key, data, ttl)
            }
            fn contains(&self, key: &str) -> bool {
                self.0.contains(key)
            }
            fn remove(&mut self, key: &str) {
                self.0.remove(key)
            }
            fn remove_matching(&mut self, fragment: &str) -> usize {
                self.0.remove_matching(fragment)
            }
            fn clear(&mut self) {
                self.0.clear()
            }
            fn sweep(&mut self) -> usize {
                self.0.sweep()
            }
            fn len(&self) -> usize {
                self.0.len()
            }
        }

        TierChain::new(vec![
            Box::new(FastTier::new(2, Duration::from_secs(60))),
            Box::new(Slow(FastTier::new(10, Duration::from_secs(600)))),
        ])
    }

    #[test]
    fn test_lookup_miss_on_empty_chain() {
        let mut chain = chain_of_two_fast();
        assert!(chain.lookup("missing").is_none());
    }

    #[test]
    fn test_store_writes_every_tier() {
        let mut chain = chain_of_two_fast();
        chain.store("k", json!(1), None);

        assert!(chain.tier(TierKind::Fast).unwrap().contains("k"));
        assert!(chain.tier(TierKind::Durable).unwrap().contains("k"));
    }

    #[test]
    fn test_lookup_promotes_from_back_tier() {
        let mut chain = chain_of_two_fast();
        chain.store("a", json!("a"), None);
        chain.store("b", json!("b"), None);
        // Pushes "a" out of the two-slot front tier
        chain.store("c", json!("c"), None);
        assert!(!chain.tier(TierKind::Fast).unwrap().contains("a"));

        let hit = chain.lookup("a").unwrap();
        assert_eq!(hit.tier, TierKind::Durable);
        assert_eq!(hit.value, json!("a"));
        assert_eq!(hit.evicted, vec!["b".to_string()]);
        assert!(chain.tier(TierKind::Fast).unwrap().contains("a"));

        let again = chain.lookup("a").unwrap();
        assert_eq!(again.tier, TierKind::Fast);
        assert!(again.evicted.is_empty());
    }

    #[test]
    fn test_remove_matching_counts_all_tiers() {
        let mut chain = chain_of_two_fast();
        chain.store("a1", json!(1), None);
        chain.store("b1", json!(2), None);

        assert_eq!(chain.remove_matching("a"), 2);
        assert!(chain.lookup("a1").is_none());
        assert!(chain.lookup("b1").is_some());
    }

    #[test]
    fn test_summaries_in_chain_order() {
        let mut chain = chain_of_two_fast();
        chain.store("k", json!(1), None);

        let summaries = chain.summaries();
        assert_eq!(summaries[0].tier, TierKind::Fast);
        assert_eq!(summaries[1].tier, TierKind::Durable);
        assert_eq!(summaries[0].entries, 1);
    }
}
