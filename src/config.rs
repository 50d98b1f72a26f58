//! Configuration Module
//!
//! Handles loading and validating proxy configuration from environment variables.

use std::collections::HashMap;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::{CacheRegion, RegionSettings};
use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://www.omdbapi.com/";

/// Proxy configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// API key appended to every upstream request
    pub omdb_api_key: String,
    /// Upstream endpoint
    pub omdb_base_url: String,
    /// HTTP server port
    pub server_port: u16,
    /// Capacity and TTL shared by every region unless overridden
    pub cache: RegionSettings,
    /// Region-specific capacity/TTL
    pub region_overrides: HashMap<CacheRegion, RegionSettings>,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Per-request upstream timeout
    pub upstream_timeout: Duration,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `OMDB_API_KEY` - Upstream API key (required by `validate`)
    /// - `OMDB_BASE_URL` - Upstream endpoint (default: http://www.omdbapi.com/)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `CACHE_MAX_ENTRIES` - Entries per region (default: 500)
    /// - `CACHE_TTL_SECS` - Entry lifetime in seconds (default: 3600)
    /// - `CACHE_<REGION>_MAX_ENTRIES` / `CACHE_<REGION>_TTL_SECS` - Per-region
    ///   overrides, e.g. `CACHE_SERIES_EPISODE_TTL_SECS`
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    /// - `UPSTREAM_TIMEOUT_SECS` - Upstream request timeout (default: 10)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let cache = RegionSettings::new(
            parse_var(&lookup, "CACHE_MAX_ENTRIES").unwrap_or(defaults.cache.max_entries),
            parse_var(&lookup, "CACHE_TTL_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache.ttl),
        );

        let mut region_overrides = HashMap::new();
        for region in CacheRegion::ALL {
            let prefix = region.env_prefix();
            let max_entries: Option<usize> =
                parse_var(&lookup, &format!("{prefix}_MAX_ENTRIES"));
            let ttl_secs: Option<u64> = parse_var(&lookup, &format!("{prefix}_TTL_SECS"));
            if max_entries.is_none() && ttl_secs.is_none() {
                continue;
            }
            region_overrides.insert(
                region,
                RegionSettings::new(
                    max_entries.unwrap_or(cache.max_entries),
                    ttl_secs.map(Duration::from_secs).unwrap_or(cache.ttl),
                ),
            );
        }

        Self {
            omdb_api_key: lookup("OMDB_API_KEY").unwrap_or(defaults.omdb_api_key),
            omdb_base_url: lookup("OMDB_BASE_URL").unwrap_or(defaults.omdb_base_url),
            server_port: parse_var(&lookup, "SERVER_PORT").unwrap_or(defaults.server_port),
            cache,
            region_overrides,
            cleanup_interval: parse_var(&lookup, "CLEANUP_INTERVAL")
                .unwrap_or(defaults.cleanup_interval),
            upstream_timeout: parse_var(&lookup, "UPSTREAM_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.upstream_timeout),
        }
    }

    /// Effective settings for `region`.
    pub fn region_settings(&self, region: CacheRegion) -> RegionSettings {
        self.region_overrides
            .get(&region)
            .copied()
            .unwrap_or(self.cache)
    }

    // == Validation ==
    /// Rejects configurations the proxy cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.omdb_api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        for region in CacheRegion::ALL {
            let settings = self.region_settings(region);
            if settings.max_entries == 0 {
                return Err(ConfigError::ZeroCapacity(region));
            }
            if settings.ttl.is_zero() {
                return Err(ConfigError::ZeroTtl(region));
            }
        }
        if self.cleanup_interval == 0 {
            return Err(ConfigError::Invalid(
                "CLEANUP_INTERVAL must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }
}

/// Reads `name` and parses it, treating unparseable values as unset.
fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    lookup(name).and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            omdb_api_key: String::new(),
            omdb_base_url: DEFAULT_BASE_URL.to_string(),
            server_port: 8080,
            cache: RegionSettings::default(),
            region_overrides: HashMap::new(),
            cleanup_interval: 60,
            upstream_timeout: Duration::from_secs(10),
        }
    }
}
