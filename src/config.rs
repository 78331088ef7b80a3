//! Configuration Module
//!
//! Loads cache, client and diagnostics settings from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;

/// Namespace prefix for every key written to the durable store.
pub const DURABLE_KEY_PREFIX: &str = "pokemon_cache_";

/// Runtime configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Capacity bound of the fast in-process tier
    pub fast_max_items: usize,
    /// Default TTL in seconds for the fast tier
    pub fast_ttl: u64,
    /// Default TTL in seconds for the durable tier
    pub durable_ttl: u64,
    /// Sweep interval in seconds
    pub sweep_interval: u64,
    /// Base URL of the Pokemon backend
    pub api_base_url: String,
    /// HTTP request timeout in seconds
    pub request_timeout: u64,
    /// Directory backing the durable store, None = platform cache dir
    pub cache_dir: Option<PathBuf>,
    /// Diagnostics HTTP port
    pub diagnostics_port: u16,
    /// Page size of the listing request issued during warmup
    pub warmup_page_size: u32,
    /// Popular lookups issued during warmup
    pub warmup_pokemon: Vec<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `FAST_MAX_ITEMS` - Fast tier capacity (default: 100)
    /// - `FAST_TTL_SECS` - Fast tier TTL (default: 300)
    /// - `DURABLE_TTL_SECS` - Durable tier TTL (default: 1800)
    /// - `SWEEP_INTERVAL_SECS` - Sweep frequency (default: 300)
    /// - `API_BASE_URL` - Backend URL (default: http://localhost:3000)
    /// - `REQUEST_TIMEOUT_SECS` - HTTP timeout (default: 10)
    /// - `CACHE_DIR` - Durable store directory (default: platform cache dir)
    /// - `DIAGNOSTICS_PORT` - Diagnostics port (default: 3100)
    /// - `WARMUP_PAGE_SIZE` - Warmup listing size (default: 20)
    /// - `WARMUP_POKEMON` - Comma separated warmup names
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            fast_max_items: parse_var("FAST_MAX_ITEMS").unwrap_or(defaults.fast_max_items),
            fast_ttl: parse_var("FAST_TTL_SECS").unwrap_or(defaults.fast_ttl),
            durable_ttl: parse_var("DURABLE_TTL_SECS").unwrap_or(defaults.durable_ttl),
            sweep_interval: parse_var("SWEEP_INTERVAL_SECS").unwrap_or(defaults.sweep_interval),
            api_base_url: env::var("API_BASE_URL").unwrap_or(defaults.api_base_url),
            request_timeout: parse_var("REQUEST_TIMEOUT_SECS").unwrap_or(defaults.request_timeout),
            cache_dir: env::var("CACHE_DIR").ok().map(PathBuf::from),
            diagnostics_port: parse_var("DIAGNOSTICS_PORT").unwrap_or(defaults.diagnostics_port),
            warmup_page_size: parse_var("WARMUP_PAGE_SIZE").unwrap_or(defaults.warmup_page_size),
            warmup_pokemon: env::var("WARMUP_POKEMON")
                .map(|v| split_names(&v))
                .unwrap_or(defaults.warmup_pokemon),
        }
    }

    pub fn fast_ttl(&self) -> Duration {
        Duration::from_secs(self.fast_ttl)
    }

    pub fn durable_ttl(&self) -> Duration {
        Duration::from_secs(self.durable_ttl)
    }

    /// Never shorter than one second.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Resolves the durable store directory.
    ///
    /// Returns None when no directory is configured and the platform cache
    /// directory cannot be determined (e.g. no home directory).
    pub fn resolve_cache_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.cache_dir {
            return Some(dir.clone());
        }
        ProjectDirs::from("", "", "pokedex-cache").map(|dirs| dirs.cache_dir().to_path_buf())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fast_max_items: 100,
            fast_ttl: 300,
            durable_ttl: 1800,
            sweep_interval: 300,
            api_base_url: "http://localhost:3000".to_string(),
            request_timeout: 10,
            cache_dir: None,
            diagnostics_port: 3100,
            warmup_page_size: 20,
            warmup_pokemon: ["pikachu", "charizard", "blastoise", "venusaur"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

fn split_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
