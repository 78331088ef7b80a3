//! Cache Engine Module
//!
//! Owns the tier chain and the hit/miss counters.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{
    CacheStats, ChainHit, DurableTier, FastTier, StatsSnapshot, Tier, TierChain, TierKind,
};
use crate::config::{Config, DURABLE_KEY_PREFIX};
use crate::store::DurableStore;

/// Engine handle shared by the client, the sweep task and diagnostics.
pub type SharedEngine = Arc<RwLock<CacheEngine>>;

/// Marker turning an `invalidate` argument into a pattern.
pub const WILDCARD: char = '*';

// == Cache Engine ==
pub struct CacheEngine {
    chain: TierChain,
    stats: CacheStats,
    /// TTL used by `preload`
    preload_ttl: Duration,
}

impl CacheEngine {
    // == Constructors ==
    /// Creates the standard fast + durable engine.
    ///
    /// # Arguments
    /// * `fast` - Bounded in-process tier
    /// * `durable` - Store-backed tier, authoritative for presence
    pub fn new(fast: FastTier, durable: DurableTier, preload_ttl: Duration) -> Self {
        Self::with_tiers(vec![Box::new(fast), Box::new(durable)], preload_ttl)
    }

    /// Creates an engine over an arbitrary tier chain, fastest first.
    pub fn with_tiers(tiers: Vec<Box<dyn Tier>>, preload_ttl: Duration) -> Self {
        Self {
            chain: TierChain::new(tiers),
            stats: CacheStats::new(),
            preload_ttl,
        }
    }

    /// Builds the engine described by `config` over `store`.
    pub fn from_config(config: &Config, store: Arc<dyn DurableStore>) -> Self {
        let fast = FastTier::new(config.fast_max_items, config.fast_ttl());
        let durable = DurableTier::new(store, DURABLE_KEY_PREFIX, config.durable_ttl());
        Self::new(fast, durable, config.durable_ttl())
    }

    pub fn into_shared(self) -> SharedEngine {
        Arc::new(RwLock::new(self))
    }

    // == Get ==
    /// Looks `key` up in every tier, promoting lower-tier hits forward.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        match self.chain.lookup(key) {
            Some(ChainHit {
                value,
                tier,
                evicted,
            }) => {
                self.stats.record_hit();
                self.record_evictions(&evicted);
                debug!(key, ?tier, "cache hit");
                Some(value)
            }
            None => {
                self.stats.record_miss();
                debug!(key, "cache miss");
                None
            }
        }
    }

    // == Set ==
    /// Stores `data` in every tier.
    ///
    /// The fast tier caps `ttl` at its own default; the durable tier uses
    /// `ttl` in full, or its default when None.
    pub fn set(&mut self, key: &str, data: Value, ttl: Option<Duration>) {
        let evicted = self.chain.store(key, data, ttl);
        self.record_evictions(&evicted);
        debug!(key, ?ttl, "cached");
    }

    // == Invalidate ==
    /// Deletes an exact key, or with a `*` every key containing the text
    /// before the marker.
    pub fn invalidate(&mut self, key_or_pattern: &str) {
        match key_or_pattern.split_once(WILDCARD) {
            Some((fragment, _)) => {
                let removed = self.chain.remove_matching(fragment);
                info!(pattern = key_or_pattern, removed, "cache invalidated");
            }
            None => {
                self.chain.remove(key_or_pattern);
                info!(key = key_or_pattern, "cache invalidated");
            }
        }
    }

    // == Clear ==
    /// Empties every tier and resets the counters.
    pub fn clear(&mut self) {
        self.chain.clear();
        self.stats.reset();
        info!("cache cleared");
    }

    // == Sweep ==
    /// Removes expired entries from every tier. Returns the total removed.
    pub fn sweep(&mut self) -> usize {
        self.chain
            .sweep()
            .into_iter()
            .map(|(tier, removed)| {
                if removed > 0 {
                    debug!(?tier, removed, "swept expired entries");
                }
                removed
            })
            .sum()
    }

    // == Preload ==
    /// Seeds the cache with known data using the preload TTL.
    pub fn preload<I>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let ttl = self.preload_ttl;
        let mut count = 0;
        for (key, data) in items {
            self.set(&key, data, Some(ttl));
            count += 1;
        }
        info!(count, "cache preloaded");
        count
    }

    // == Stats ==
    pub fn stats(&self) -> StatsSnapshot {
        StatsSnapshot::new(&self.stats, self.chain.summaries())
    }

    /// Live presence of `key` in one tier, without touching the counters.
    pub fn contains_in(&self, tier: TierKind, key: &str) -> bool {
        self.chain
            .tier(tier)
            .map(|t| t.contains(key))
            .unwrap_or(false)
    }

    fn record_evictions(&mut self, evicted: &[String]) {
        for key in evicted {
            self.stats.record_eviction();
            debug!(key = key.as_str(), "evicted from fast tier");
        }
    }
}
