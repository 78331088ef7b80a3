//! Pokedex Cache - two-tier read-through cache for a Pokemon API client
//!
//! A bounded in-process tier sits in front of a durable local store. The
//! read-through client consults both before going to the network.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::{AppState, Diagnostics, DiagnosticsPort};
pub use cache::{CacheEngine, SharedEngine};
pub use client::{Endpoints, HttpFetcher, ReadThroughClient};
pub use config::Config;
pub use error::{ClientError, StoreError};
pub use tasks::{spawn_sweep_task, spawn_warmup_task, WarmupPlan};
