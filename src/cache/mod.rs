//! Cache Module
//!
//! Two-tier cache: a bounded in-process tier in front of a store-backed
//! durable tier, with TTL expiration, FIFO eviction and hit/miss statistics.

mod durable;
mod engine;
mod entry;
mod fast;
mod fifo;
mod stats;
mod tier;


// Re-export public types
pub use durable::DurableTier;
pub use engine::{CacheEngine, SharedEngine, WILDCARD};
pub use entry::{current_timestamp_ms, CacheEntry};
pub use fast::FastTier;
pub use fifo::InsertionOrder;
pub use stats::{estimate_memory_size, CacheStats, StatsSnapshot, TierSummary};
pub use tier::{ChainHit, Tier, TierChain, TierKind};
