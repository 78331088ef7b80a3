//! Pokedex Cache - two-tier read-through cache for a Pokemon API client
//!
//! Runs the cache with its sweep task, warms it up, and serves the
//! diagnostics surface until shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex_cache::api::{create_router, log_performance_report};
use pokedex_cache::store::{DurableStore, FileStore, MemoryStore};
use pokedex_cache::{
    spawn_sweep_task, spawn_warmup_task, AppState, CacheEngine, Config, DiagnosticsPort, Endpoints,
    HttpFetcher, ReadThroughClient, WarmupPlan,
};

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the durable store and build the cache engine
/// 4. Start background sweep task
/// 5. Start warmup in the background (never fatal)
/// 6. Serve the diagnostics router
/// 7. On SIGINT/SIGTERM, stop tasks and log a performance report
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Pokedex Cache");

    let config = Config::from_env();
    info!(
        "Configuration loaded: fast_max_items={}, fast_ttl={}s, durable_ttl={}s, sweep_interval={}s, api={}",
        config.fast_max_items,
        config.fast_ttl,
        config.durable_ttl,
        config.sweep_interval,
        config.api_base_url
    );

    let store: Arc<dyn DurableStore> = match config.resolve_cache_dir() {
        Some(dir) => {
            info!("Durable store at {}", dir.display());
            Arc::new(FileStore::new(dir))
        }
        None => {
            warn!("No cache directory available, durable tier kept in memory");
            Arc::new(MemoryStore::new())
        }
    };

    let engine = CacheEngine::from_config(&config, store).into_shared();
    let fetcher =
        HttpFetcher::new(config.request_timeout()).context("failed to build HTTP client")?;
    let client = ReadThroughClient::new(
        engine.clone(),
        Arc::new(fetcher),
        Endpoints::new(&config.api_base_url),
    );

    let sweep_handle = spawn_sweep_task(engine.clone(), config.sweep_interval());
    info!("Background sweep task started");

    let plan = WarmupPlan::from_config(&config);
    let warmup_handle = spawn_warmup_task(client.clone(), plan.clone());

    let state = AppState::new(client, plan);
    let diagnostics = state.diagnostics.clone();
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.diagnostics_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind diagnostics port {}", addr))?;
    info!("Diagnostics listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("diagnostics server failed")?;

    sweep_handle.abort();
    warmup_handle.abort();
    log_performance_report(&diagnostics.stats().await);

    info!("Shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
