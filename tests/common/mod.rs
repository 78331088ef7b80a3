//! Shared helpers: a local Pokemon backend served by axum.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

/// Counts requests per path.
#[derive(Clone, Default)]
pub struct Backend {
    hits: Arc<AtomicUsize>,
}

impl Backend {
    pub fn requests(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

pub fn pokemon_json(id: u32, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "height": 4,
        "weight": 60,
        "base_experience": 112,
        "types": ["electric"],
        "abilities": [{"name": "static", "is_hidden": false}],
        "stats": [{"name": "speed", "base_stat": 90}],
        "sprites": {"front_default": format!("https://img/{}.png", id)},
        "moves": ["thunder-shock"]
    })
}

async fn pokemon(State(backend): State<Backend>, Path(name): Path<String>) -> impl IntoResponse {
    backend.hits.fetch_add(1, Ordering::SeqCst);
    match name.as_str() {
        "pikachu" => (StatusCode::OK, Json(pokemon_json(25, "pikachu"))),
        "charizard" => (StatusCode::OK, Json(pokemon_json(6, "charizard"))),
        "blastoise" => (StatusCode::OK, Json(pokemon_json(9, "blastoise"))),
        "venusaur" => (StatusCode::OK, Json(pokemon_json(3, "venusaur"))),
        "glitch" => (StatusCode::OK, Json(json!({"unexpected": true}))),
        "crash" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "boom"})),
        ),
        _ => (StatusCode::NOT_FOUND, Json(json!({"error": "not found"}))),
    }
}

async fn listing(
    State(backend): State<Backend>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    backend.hits.fetch_add(1, Ordering::SeqCst);
    let limit: usize = params.get("limit").and_then(|v| v.parse().ok()).unwrap_or(20);
    let results: Vec<Value> = ["bulbasaur", "ivysaur", "venusaur"]
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, name)| json!({"id": i + 1, "name": name, "types": ["grass"], "sprite": "s"}))
        .collect();
    Json(json!({"count": 3, "next": null, "previous": null, "results": results}))
}

/// Starts the backend on an ephemeral port and returns its base URL.
pub async fn spawn_backend() -> (String, Backend) {
    let backend = Backend::default();
    let app = Router::new()
        .route("/pokemon", get(listing))
        .route("/pokemon/:name", get(pokemon))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), backend)
}
