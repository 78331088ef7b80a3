//! Cache Statistics Module
//!
//! Tracks lookup counters and builds the diagnostics snapshot.

use serde::Serialize;

use crate::cache::TierKind;

// == Cache Stats ==
/// Process-wide lookup counters. Monotonic until `reset`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of lookups
    pub requests: u64,
    /// Number of lookups answered by any tier
    pub hits: u64,
    /// Number of lookups no tier could answer
    pub misses: u64,
    /// Number of fast tier entries evicted to make room
    pub evictions: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Efficiency ==
    /// Calculates hits / requests, or 0.0 if no requests have been made.
    pub fn efficiency(&self) -> f64 {
        if self.requests == 0 {
            0.0
        } else {
            self.hits as f64 / self.requests as f64
        }
    }

    /// Efficiency as a percentage with one decimal, e.g. `"40.0%"`.
    pub fn efficiency_label(&self) -> String {
        format!("{:.1}%", self.efficiency() * 100.0)
    }

    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.requests += 1;
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Reset ==
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// == Tier Summary ==
/// Entry count of a single tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierSummary {
    pub tier: TierKind,
    pub entries: usize,
}

// == Stats Snapshot ==
/// Point-in-time view of the counters and tier occupancy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub requests: u64,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    /// Formatted hits / requests
    pub efficiency: String,
    /// Live entries in the fast tier
    pub memory_items: usize,
    /// Entries in the durable tier
    pub durable_items: usize,
    /// Rough memory estimate of the fast tier, entry-count based
    pub memory_size: String,
    pub tiers: Vec<TierSummary>,
}

impl StatsSnapshot {
    pub fn new(stats: &CacheStats, tiers: Vec<TierSummary>) -> Self {
        let count = |kind: TierKind| {
            tiers
                .iter()
                .filter(|t| t.tier == kind)
                .map(|t| t.entries)
                .sum::<usize>()
        };
        let memory_items = count(TierKind::Fast);
        let durable_items = count(TierKind::Durable);

        Self {
            requests: stats.requests,
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            efficiency: stats.efficiency_label(),
            memory_items,
            durable_items,
            memory_size: estimate_memory_size(memory_items),
            tiers,
        }
    }
}

/// Approximates 0.1 KB per in-memory entry.
pub fn estimate_memory_size(entries: usize) -> String {
    format!("{}KB", (entries as f64 * 0.1).round() as u64)
}
