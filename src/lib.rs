//! OMDb Proxy - a caching front for the OMDb movie and series API
//!
//! Memoizes successful upstream lookups in named cache regions with fixed
//! TTL expiry and LRU eviction. Failures are never cached.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod service;
pub mod tasks;
pub mod upstream;

pub use api::{create_router, AppState};
pub use cache::{CacheGate, CacheRegion, CacheRegistry};
pub use config::Config;
pub use service::{MovieService, SeriesService};
pub use tasks::spawn_cleanup_task;
pub use upstream::{HttpOmdbClient, OmdbClient};
