//! Diagnostics port.
//!
//! The stable contract an operator surface binds to. The HTTP router is one
//! binding; tests and the shutdown report use it directly.

use async_trait::async_trait;
use tracing::info;

use crate::cache::StatsSnapshot;
use crate::client::ReadThroughClient;
use crate::tasks::{run_warmup, WarmupPlan, WarmupReport};

#[async_trait]
pub trait DiagnosticsPort: Send + Sync {
    async fn stats(&self) -> StatsSnapshot;

    /// Empties both tiers and resets the counters.
    async fn clear(&self);

    async fn warmup(&self) -> WarmupReport;

    async fn invalidate(&self, key_or_pattern: &str);
}

/// Port implementation over a read-through client and its engine.
#[derive(Clone)]
pub struct Diagnostics {
    client: ReadThroughClient,
    plan: WarmupPlan,
}

impl Diagnostics {
    pub fn new(client: ReadThroughClient, plan: WarmupPlan) -> Self {
        Self { client, plan }
    }
}

#[async_trait]
impl DiagnosticsPort for Diagnostics {
    async fn stats(&self) -> StatsSnapshot {
        self.client.engine().read().await.stats()
    }

    async fn clear(&self) {
        self.client.engine().write().await.clear();
    }

    async fn warmup(&self) -> WarmupReport {
        run_warmup(&self.client, &self.plan).await
    }

    async fn invalidate(&self, key_or_pattern: &str) {
        self.client.engine().write().await.invalidate(key_or_pattern);
    }
}

/// Logs a one-shot performance summary.
pub fn log_performance_report(stats: &StatsSnapshot) {
    info!(
        requests = stats.requests,
        hits = stats.hits,
        misses = stats.misses,
        efficiency = stats.efficiency.as_str(),
        memory_items = stats.memory_items,
        durable_items = stats.durable_items,
        memory_size = stats.memory_size.as_str(),
        "cache performance report"
    );
}
