//! Cache Warmup
//!
//! Issues a fixed batch of lookups through the read-through client so their
//! results are cached before users ask for them. Every lookup runs
//! concurrently and fails on its own; warmup itself never fails.

use futures::future::{join, join_all};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::client::ReadThroughClient;
use crate::config::Config;
use crate::models::{PokemonData, PokemonPage};

/// The lookups issued by a warmup run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarmupPlan {
    /// Size of the first listing page
    pub page_size: u32,
    /// Names looked up individually
    pub popular: Vec<String>,
}

impl WarmupPlan {
    pub fn from_config(config: &Config) -> Self {
        Self {
            page_size: config.warmup_page_size,
            popular: config.warmup_pokemon.clone(),
        }
    }
}

impl Default for WarmupPlan {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarmupFailure {
    pub key: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WarmupReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failures: Vec<WarmupFailure>,
}

impl WarmupReport {
    fn record(&mut self, key: String, outcome: crate::error::Result<()>) {
        self.attempted += 1;
        match outcome {
            Ok(()) => self.succeeded += 1,
            Err(e) => {
                warn!(key = key.as_str(), error = %e, "could not preload");
                self.failures.push(WarmupFailure {
                    key,
                    error: e.to_string(),
                });
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs every lookup in `plan` concurrently and reports the outcome.
pub async fn run_warmup(client: &ReadThroughClient, plan: &WarmupPlan) -> WarmupReport {
    info!(
        lookups = plan.popular.len() + 1,
        "warming up cache with popular Pokemon"
    );

    let listing = async {
        let key = client.endpoints().pokemon_list(plan.page_size, 0);
        let outcome = client.fetch::<PokemonPage>(&key).await.map(|_| ());
        (key, outcome)
    };

    let lookups = plan.popular.iter().map(|name| async move {
        let key = client.endpoints().pokemon(name);
        let outcome = client.fetch::<PokemonData>(&key).await.map(|_| ());
        (key, outcome)
    });

    let (first, rest) = join(listing, join_all(lookups)).await;

    let mut report = WarmupReport::default();
    for (key, outcome) in std::iter::once(first).chain(rest) {
        report.record(key, outcome);
    }

    info!(
        succeeded = report.succeeded,
        failed = report.failures.len(),
        "cache warmup complete"
    );
    report
}

/// Runs warmup in the background so startup does not wait on it.
pub fn spawn_warmup_task(client: ReadThroughClient, plan: WarmupPlan) -> JoinHandle<WarmupReport> {
    tokio::spawn(async move { run_warmup(&client, &plan).await })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheEngine, TierKind};
    use crate::client::{Endpoints, StubFetcher};
    use crate::store::MemoryStore;
    use serde_json::json;
    use std::sync::Arc;

    const BASE: &str = "http://localhost:3000";

    fn pokemon_json(id: u32, name: &str) -> String {
        json!({
            "id": id,
            "name": name,
            "height": 10,
            "weight": 100,
            "types": ["normal"],
            "abilities": [],
            "stats": [],
            "sprites": {"front_default": format!("https://img/{}.png", id)}
        })
        .to_string()
    }

    fn page_json() -> String {
        json!({"count": 0, "next": null, "previous": null, "results": []}).to_string()
    }

    fn client_with(fetcher: Arc<StubFetcher>) -> ReadThroughClient {
        let engine =
            CacheEngine::from_config(&Config::default(), Arc::new(MemoryStore::new())).into_shared();
        ReadThroughClient::new(engine, fetcher, Endpoints::new(BASE))
    }

    fn plan(names: &[&str]) -> WarmupPlan {
        WarmupPlan {
            page_size: 20,
            popular: names.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_warmup_populates_cache() {
        let fetcher = Arc::new(StubFetcher::new());
        fetcher.respond(&format!("{}/pokemon?limit=20&offset=0", BASE), 200, &page_json());
        fetcher.respond(&format!("{}/pokemon/pikachu", BASE), 200, &pokemon_json(25, "pikachu"));
        fetcher.respond(&format!("{}/pokemon/mew", BASE), 200, &pokemon_json(151, "mew"));
        let client = client_with(fetcher.clone());

        let report = run_warmup(&client, &plan(&["pikachu", "mew"])).await;

        assert_eq!(report.attempted, 3);
        assert_eq!(report.succeeded, 3);
        assert!(report.is_complete());

        client.pokemon("mew").await.unwrap();
        assert_eq!(fetcher.calls(), 3, "warmed lookups are served from cache");
    }

    #[tokio::test]
    async fn test_one_failure_does_not_cancel_others() {
        let fetcher = Arc::new(StubFetcher::new());
        fetcher.respond(&format!("{}/pokemon?limit=20&offset=0", BASE), 200, &page_json());
        fetcher.respond(&format!("{}/pokemon/pikachu", BASE), 200, &pokemon_json(25, "pikachu"));
        fetcher.unreachable(&format!("{}/pokemon/charizard", BASE), "connection reset");
        // venusaur is unscripted and answers 404
        let client = client_with(fetcher);

        let report = run_warmup(&client, &plan(&["pikachu", "charizard", "venusaur"])).await;

        assert_eq!(report.attempted, 4);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failures.len(), 2);
        assert!(report
            .failures
            .iter()
            .any(|f| f.key.ends_with("/pokemon/charizard")));

        let engine = client.engine().read().await;
        assert!(engine.contains_in(TierKind::Fast, &format!("{}/pokemon/pikachu", BASE)));
    }

    #[tokio::test]
    async fn test_spawned_warmup_reports() {
        let fetcher = Arc::new(StubFetcher::new());
        let client = client_with(fetcher);

        let report = spawn_warmup_task(client, plan(&[])).await.unwrap();

        assert_eq!(report.attempted, 1);
        assert_eq!(report.failures.len(), 1);
    }
}
