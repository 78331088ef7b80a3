//! API Routes
//!
//! Configures the Axum router for the diagnostics surface.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, health_handler, invalidate_handler, lookup_handler, stats_handler,
    warmup_handler, AppState,
};

/// Creates the diagnostics router.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/stats", get(stats_handler))
        .route("/clear", post(clear_handler))
        .route("/warmup", post(warmup_handler))
        .route("/invalidate", post(invalidate_handler))
        .route("/lookup/:name", get(lookup_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
