//! Cache Module
//!
//! Region-scoped in-memory caching with fixed TTL expiry, LRU eviction and
//! admission-controlled memoization of upstream results.

mod entry;
mod gate;
pub mod keys;
mod lru;
mod region;
mod registry;
mod stats;
mod store;


use std::sync::Arc;

use tokio::sync::RwLock;

// Re-export public types
pub use entry::CacheEntry;
pub use gate::{Admission, CacheGate};
pub use keys::CacheKey;
pub use lru::LruTracker;
pub use region::CacheRegion;
pub use registry::CacheRegistry;
pub use stats::CacheStats;
pub use store::{CacheStore, RegionSettings};

/// A region store shared between its gate and the maintenance paths.
pub type SharedStore<V> = Arc<RwLock<CacheStore<V>>>;

/// Creates an empty shared store for `region`.
pub fn shared_store<V: Clone>(region: CacheRegion, settings: RegionSettings) -> SharedStore<V> {
    Arc::new(RwLock::new(CacheStore::new(region, settings)))
}
