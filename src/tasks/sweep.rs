//! Expiration Sweep Task
//!
//! Periodically removes expired entries. This is the only place expired
//! durable entries are guaranteed to be physically deleted.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedEngine;

/// Spawns a background task sweeping `engine` every `interval`.
///
/// Each pass holds the engine lock only for one scan of the fast tier and
/// one enumeration of the durable store's prefixed keys.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_sweep_task(engine: SharedEngine, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_secs = interval.as_secs(), "starting cache sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = engine.write().await.sweep();

            if removed > 0 {
                info!("cache sweep: removed {} expired entries", removed);
            } else {
                debug!("cache sweep: no expired entries found");
            }
        }
    })
}
