//! Read-through client.
//!
//! A hit costs no network call. A miss performs exactly one GET and, on
//! success, exactly one cache write. Failures leave the cache untouched.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::SharedEngine;
use crate::client::{Endpoints, Fetcher};
use crate::error::{ClientError, Result};
use crate::models::{PokemonData, PokemonPage};

/// TTL of fetched API data.
pub const DEFAULT_RESOURCE_TTL: Duration = Duration::from_secs(5 * 60);

// == Resource Trait ==
/// A response type the client can fetch and cache.
pub trait Resource: DeserializeOwned + Send + 'static {
    /// How long a fetched value is cached.
    fn ttl() -> Duration {
        DEFAULT_RESOURCE_TTL
    }
}

impl Resource for PokemonData {}

impl Resource for PokemonPage {}

/// Untyped payloads (species, evolution chains, catalogues).
impl Resource for Value {}

// == Read-Through Client ==
#[derive(Clone)]
pub struct ReadThroughClient {
    engine: SharedEngine,
    fetcher: Arc<dyn Fetcher>,
    endpoints: Endpoints,
}

impl ReadThroughClient {
    pub fn new(engine: SharedEngine, fetcher: Arc<dyn Fetcher>, endpoints: Endpoints) -> Self {
        Self {
            engine,
            fetcher,
            endpoints,
        }
    }

    pub fn engine(&self) -> &SharedEngine {
        &self.engine
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    // == Fetch ==
    /// Returns the value for `key` (a fully built request URL), from the
    /// cache when possible.
    ///
    /// The network step runs in its own task: if the caller drops this
    /// future while the request is in flight, the response is still
    /// written to the cache on completion.
    pub async fn fetch<T: Resource>(&self, key: &str) -> Result<T> {
        let cached = self.engine.write().await.get(key);
        if let Some(value) = cached {
            return T::deserialize(&value).map_err(|e| ClientError::decode(key, e));
        }

        let task = tokio::spawn(populate::<T>(
            self.engine.clone(),
            self.fetcher.clone(),
            key.to_string(),
        ));
        let result = task
            .await
            .map_err(|e| ClientError::transport(key, e))
            .and_then(|r| r);

        if let Err(e) = &result {
            warn!(error = %e, "fetch failed");
        }
        result
    }

    // == Typed Operations ==
    pub async fn pokemon(&self, name: &str) -> Result<PokemonData> {
        self.fetch(&self.endpoints.pokemon(name)).await
    }

    pub async fn pokemon_by_id(&self, id: u32) -> Result<PokemonData> {
        self.fetch(&self.endpoints.pokemon(&id.to_string())).await
    }

    /// Name or numeric id; the backend resolves both on one endpoint.
    pub async fn search(&self, query: &str) -> Result<PokemonData> {
        self.fetch(&self.endpoints.pokemon(query.trim())).await
    }

    pub async fn pokemon_list(&self, limit: u32, offset: u32) -> Result<PokemonPage> {
        self.fetch(&self.endpoints.pokemon_list(limit, offset)).await
    }

    pub async fn species(&self, name: &str) -> Result<Value> {
        self.fetch(&self.endpoints.species(name)).await
    }

    pub async fn evolution(&self, name: &str) -> Result<Value> {
        self.fetch(&self.endpoints.evolution(name)).await
    }

    pub async fn by_type(&self, type_name: &str, limit: u32) -> Result<Value> {
        self.fetch(&self.endpoints.by_type(type_name, limit)).await
    }

    pub async fn types(&self) -> Result<Value> {
        self.fetch(&self.endpoints.types()).await
    }

    pub async fn type_info(&self, name: &str) -> Result<Value> {
        self.fetch(&self.endpoints.type_info(name)).await
    }

    pub async fn generations(&self) -> Result<Value> {
        self.fetch(&self.endpoints.generations()).await
    }

    pub async fn generation(&self, id: u32) -> Result<Value> {
        self.fetch(&self.endpoints.generation(id)).await
    }
}

/// Network step of a miss: GET, validate, then cache.
async fn populate<T: Resource>(
    engine: SharedEngine,
    fetcher: Arc<dyn Fetcher>,
    url: String,
) -> Result<T> {
    debug!(url = url.as_str(), "fetching from network");
    let response = fetcher.get(&url).await?;

    if !response.is_success() {
        return Err(ClientError::RequestFailed {
            reason: format!("Error {}: {}", response.status, response.reason),
            status: Some(response.status),
            url,
        });
    }

    // Shape is checked before anything is cached
    let value: Value =
        serde_json::from_str(&response.body).map_err(|e| ClientError::decode(&url, e))?;
    let data = T::deserialize(&value).map_err(|e| ClientError::decode(&url, e))?;

    engine.write().await.set(&url, value, Some(T::ttl()));
    Ok(data)
}
