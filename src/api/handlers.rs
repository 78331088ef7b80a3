//! API Handlers
//!
//! HTTP request handlers binding the diagnostics port.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::api::{Diagnostics, DiagnosticsPort};
use crate::cache::StatsSnapshot;
use crate::client::ReadThroughClient;
use crate::error::Result;
use crate::models::{
    ClearResponse, ErrorResponse, HealthResponse, InvalidateRequest, InvalidateResponse,
    PokemonData,
};
use crate::tasks::{WarmupPlan, WarmupReport};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub diagnostics: Arc<dyn DiagnosticsPort>,
    pub client: ReadThroughClient,
}

impl AppState {
    pub fn new(client: ReadThroughClient, plan: WarmupPlan) -> Self {
        Self {
            diagnostics: Arc::new(Diagnostics::new(client.clone(), plan)),
            client,
        }
    }
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsSnapshot> {
    Json(state.diagnostics.stats().await)
}

/// Handler for POST /clear
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.diagnostics.clear().await;
    Json(ClearResponse::new())
}

/// Handler for POST /warmup
///
/// Always answers 200; individual lookup failures are listed in the report.
pub async fn warmup_handler(State(state): State<AppState>) -> Json<WarmupReport> {
    Json(state.diagnostics.warmup().await)
}

/// Handler for POST /invalidate
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Json(req): Json<InvalidateRequest>,
) -> std::result::Result<Json<InvalidateResponse>, (StatusCode, Json<ErrorResponse>)> {
    if let Some(error_msg) = req.validate() {
        return Err((StatusCode::BAD_REQUEST, Json(ErrorResponse::new(error_msg))));
    }

    state.diagnostics.invalidate(&req.pattern).await;
    Ok(Json(InvalidateResponse::new(req.pattern)))
}

/// Handler for GET /lookup/:name
///
/// Read-through lookup, handy for checking the cache from a shell.
pub async fn lookup_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<PokemonData>> {
    let pokemon = state.client.search(&name).await?;
    Ok(Json(pokemon))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
