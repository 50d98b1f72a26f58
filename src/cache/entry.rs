//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with fixed TTL expiry.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cached value with its insertion and expiry instants.
///
/// Expiry is fixed at insertion time. Reads never extend it.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// When the entry was admitted
    pub inserted_at: Instant,
    /// When the entry stops being served
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry inserted at `now` that expires after `ttl`.
    pub fn inserted_at(value: V, ttl: Duration, now: Instant) -> Self {
        Self {
            value,
            inserted_at: now,
            expires_at: now + ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`, so
    /// it is served for strictly less than the full TTL.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
