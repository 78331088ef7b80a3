//! Background Tasks Module
//!
//! # Tasks
//! - Sweep: removes expired entries from both tiers at a fixed interval
//! - Warmup: preloads predicted-useful lookups once at startup

mod sweep;
mod warmup;

pub use sweep::spawn_sweep_task;
pub use warmup::{run_warmup, spawn_warmup_task, WarmupFailure, WarmupPlan, WarmupReport};
