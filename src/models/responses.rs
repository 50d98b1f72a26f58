//! Response DTOs for the service and cache maintenance endpoints
//!
//! Defines the structure of outgoing HTTP response bodies that are not media
//! payloads.

use serde::{Deserialize, Serialize};

use crate::cache::{CacheRegion, CacheStats, RegionSettings};

/// Statistics for one cache region (GET /cache/stats)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionStatsResponse {
    pub region: CacheRegion,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub total_entries: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
    #[serde(flatten)]
    pub settings: RegionSettings,
}

impl RegionStatsResponse {
    pub fn new(region: CacheRegion, stats: &CacheStats, settings: RegionSettings) -> Self {
        Self {
            region,
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            settings,
        }
    }
}

/// Body of GET /cache/stats
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    pub regions: Vec<RegionStatsResponse>,
}

/// Body of DELETE /cache/:region
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
    pub region: CacheRegion,
    pub removed: usize,
}

impl ClearResponse {
    pub fn new(region: CacheRegion, removed: usize) -> Self {
        Self {
            message: format!("Region '{}' cleared", region),
            region,
            removed,
        }
    }
}

/// Body of DELETE /cache/:region/:key
#[derive(Debug, Clone, Serialize)]
pub struct EvictResponse {
    pub message: String,
    pub region: CacheRegion,
    pub key: String,
}

impl EvictResponse {
    pub fn new(region: CacheRegion, key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' evicted from '{}'", key, region),
            region,
            key,
        }
    }
}

/// Body of GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// Current timestamp in RFC 3339 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error body for every failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub error_message: String,
    pub error_code: u16,
}

impl ErrorResponse {
    pub fn new(error_message: impl Into<String>, error_code: u16) -> Self {
        Self {
            success: false,
            error_message: error_message.into(),
            error_code,
        }
    }
}
