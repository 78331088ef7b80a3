//! Read-Through Client Module
//!
//! Consults the cache engine before any network I/O and populates it on a
//! successful miss.

mod endpoints;
mod fetcher;
mod read_through;

pub use endpoints::Endpoints;
pub use fetcher::{FetchResponse, Fetcher, HttpFetcher};
pub use read_through::{ReadThroughClient, Resource, DEFAULT_RESOURCE_TTL};

#[cfg(test)]
pub(crate) use fetcher::stub::StubFetcher;
