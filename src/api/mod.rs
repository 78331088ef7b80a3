//! Diagnostics API Module
//!
//! Operator-facing surface over the cache. Not part of the request path.
//!
//! # Endpoints
//! - `GET /stats` - Counters and tier occupancy
//! - `POST /clear` - Empty both tiers and reset counters
//! - `POST /warmup` - Run the warmup batch now
//! - `POST /invalidate` - Drop a key or `prefix*` pattern
//! - `GET /lookup/:name` - Read-through Pokemon lookup
//! - `GET /health` - Health check endpoint

pub mod diagnostics;
pub mod handlers;
pub mod routes;

pub use diagnostics::{log_performance_report, Diagnostics, DiagnosticsPort};
pub use handlers::*;
pub use routes::create_router;
