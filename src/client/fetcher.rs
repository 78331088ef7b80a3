//! Network fetch seam.
//!
//! `Fetcher` is the only place the client touches the network. Transport
//! failures come back as `ClientError::RequestFailed` with no status.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;

use crate::error::{ClientError, Result};

/// Raw result of a GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    /// Canonical reason phrase, e.g. "Not Found"
    pub reason: String,
    pub body: String,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn get(&self, url: &str) -> Result<FetchResponse>;
}

// == HTTP Fetcher ==
/// reqwest-backed fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str) -> Result<FetchResponse> {
        let response = self
            .client
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ClientError::transport(url, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::transport(url, e))?;

        Ok(FetchResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}
