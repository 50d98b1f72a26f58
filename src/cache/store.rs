//! Cache Store Module
//!
//! Bounded, time-expiring key/value store backing one cache region.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::cache::{CacheEntry, CacheRegion, CacheStats, LruTracker};

// == Region Settings ==
/// Capacity and lifetime of one region's store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSettings {
    /// Soft ceiling on stored entries, enforced on `put`
    pub max_entries: usize,
    /// Lifetime of an entry measured from its insertion
    #[serde(rename = "ttlSecs", serialize_with = "serialize_secs")]
    pub ttl: Duration,
}

impl RegionSettings {
    /// Creates settings holding `max_entries` entries for `ttl` each.
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self { max_entries, ttl }
    }
}

impl Default for RegionSettings {
    fn default() -> Self {
        Self {
            max_entries: 500,
            ttl: Duration::from_secs(3600),
        }
    }
}

fn serialize_secs<S: serde::Serializer>(ttl: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(ttl.as_secs())
}

// == Cache Store ==
/// Storage for a single region with LRU eviction and fixed-TTL expiry.
///
/// Expired entries are reclaimed lazily by `get` and eagerly by
/// `cleanup_expired`. Reads refresh recency but never the expiry.
#[derive(Debug)]
pub struct CacheStore<V> {
    region: CacheRegion,
    entries: HashMap<String, CacheEntry<V>>,
    lru: LruTracker,
    stats: CacheStats,
    settings: RegionSettings,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store for `region`.
    pub fn new(region: CacheRegion, settings: RegionSettings) -> Self {
        Self {
            region,
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            settings,
        }
    }

    /// Returns the region this store backs.
    pub fn region(&self) -> CacheRegion {
        self.region
    }

    /// Returns the capacity and TTL of this store.
    pub fn settings(&self) -> RegionSettings {
        self.settings
    }

    // == Get ==
    /// Returns the stored value if present and unexpired.
    ///
    /// Never computes anything: absence is reported as `None`. An expired
    /// entry found here is removed and counted as a miss.
    pub fn get(&mut self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    fn get_at(&mut self, key: &str, now: Instant) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired_at(now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.remove_entry(key);
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        self.lru.touch(key);
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Put ==
    /// Inserts or overwrites `key`, restarting its TTL.
    ///
    /// When a new key would exceed capacity, the least recently used entry is
    /// evicted first.
    pub fn put(&mut self, key: String, value: V) {
        self.put_at(key, value, Instant::now());
    }

    fn put_at(&mut self, key: String, value: V, now: Instant) {
        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite {
            while self.entries.len() >= self.settings.max_entries {
                match self.lru.evict_oldest() {
                    Some(evicted) => {
                        self.entries.remove(&evicted);
                        self.stats.record_eviction();
                    }
                    None => break,
                }
            }
        }

        let entry = CacheEntry::inserted_at(value, self.settings.ttl, now);
        self.entries.insert(key.clone(), entry);
        self.lru.touch(&key);
        debug_assert_eq!(self.lru.len(), self.entries.len());
        self.stats.set_total_entries(self.entries.len());
    }

    // == Evict ==
    /// Removes `key`, returning whether an entry was present.
    pub fn evict(&mut self, key: &str) -> bool {
        self.remove_entry(key)
    }

    // == Clear ==
    /// Removes every entry, returning how many were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.lru.clear();
        self.stats.set_total_entries(0);
        count
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        self.cleanup_expired_at(Instant::now())
    }

    fn cleanup_expired_at(&mut self, now: Instant) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove_entry(key);
        }

        expired_keys.len()
    }

    // == Stats ==
    /// Returns a snapshot of the counters with the current entry count.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Checks if `key` is stored, expired or not.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove_entry(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.lru.remove(key);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    const EPSILON: Duration = Duration::from_millis(1);

    fn store(max_entries: usize) -> CacheStore<String> {
        CacheStore::new(
            CacheRegion::MoviesByTitle,
            RegionSettings::new(max_entries, Duration::from_secs(3600)),
        )
    }

    #[test]
    fn test_store_new() {
        let store = store(100);
        assert!(store.is_empty());
        assert_eq!(store.region(), CacheRegion::MoviesByTitle);
        assert_eq!(store.settings().max_entries, 100);
    }

    #[test]
    fn test_store_put_and_get() {
        let mut store = store(100);

        store.put("the matrix".to_string(), "payload".to_string());

        assert_eq!(store.get("the matrix"), Some("payload".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = store(100);
        assert_eq!(store.get("nonexistent"), None);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = store(100);

        store.put("k".to_string(), "v1".to_string());
        store.put("k".to_string(), "v2".to_string());

        assert_eq!(store.get("k"), Some("v2".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_evict() {
        let mut store = store(100);

        store.put("k".to_string(), "v".to_string());

        assert!(store.evict("k"));
        assert!(!store.evict("k"));
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn test_store_clear() {
        let mut store = store(100);

        store.put("a".to_string(), "1".to_string());
        store.put("b".to_string(), "2".to_string());

        assert_eq!(store.clear(), 2);
        assert!(store.is_empty());
        assert_eq!(store.stats().total_entries, 0);
    }

    #[test]
    fn test_store_hit_before_ttl_miss_after() {
        let mut store = store(100);
        let ttl = store.settings().ttl;
        let start = Instant::now();

        store.put_at("k".to_string(), "v".to_string(), start);

        assert_eq!(store.get_at("k", start + ttl - EPSILON), Some("v".to_string()));
        assert_eq!(store.get_at("k", start + ttl + EPSILON), None);
        assert!(!store.contains_key("k"), "Expired entry should be reclaimed on read");
    }

    #[test]
    fn test_store_reads_do_not_extend_ttl() {
        let mut store = store(100);
        let ttl = store.settings().ttl;
        let start = Instant::now();

        store.put_at("k".to_string(), "v".to_string(), start);
        for step in 1..10 {
            assert!(store.get_at("k", start + ttl / 10 * step).is_some());
        }

        assert_eq!(store.get_at("k", start + ttl), None);
    }

    #[test]
    fn test_store_overwrite_restarts_ttl() {
        let mut store = store(100);
        let ttl = store.settings().ttl;
        let start = Instant::now();

        store.put_at("k".to_string(), "v1".to_string(), start);
        store.put_at("k".to_string(), "v2".to_string(), start + ttl / 2);

        assert_eq!(store.get_at("k", start + ttl + EPSILON), Some("v2".to_string()));
    }

    #[test]
    fn test_store_real_time_expiration() {
        let mut store: CacheStore<String> = CacheStore::new(
            CacheRegion::SeriesSeason,
            RegionSettings::new(10, Duration::from_millis(50)),
        );

        store.put("k".to_string(), "v".to_string());
        assert!(store.get("k").is_some());

        sleep(Duration::from_millis(80));
        assert!(store.get("k").is_none());
    }

    #[test]
    fn test_store_capacity_evicts_least_recently_used() {
        let mut store = store(3);

        store.put("key1".to_string(), "v1".to_string());
        store.put("key2".to_string(), "v2".to_string());
        store.put("key3".to_string(), "v3".to_string());
        store.put("key4".to_string(), "v4".to_string());

        assert_eq!(store.len(), 3);
        assert!(!store.contains_key("key1"));
        assert!(store.get("key2").is_some());
        assert!(store.get("key3").is_some());
        assert!(store.get("key4").is_some());
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_hit_refreshes_recency() {
        let mut store = store(3);

        store.put("key1".to_string(), "v1".to_string());
        store.put("key2".to_string(), "v2".to_string());
        store.put("key3".to_string(), "v3".to_string());
        store.get("key1");

        store.put("key4".to_string(), "v4".to_string());

        assert!(store.contains_key("key1"));
        assert!(!store.contains_key("key2"));
    }

    #[test]
    fn test_store_overwrite_at_capacity_does_not_evict() {
        let mut store = store(2);

        store.put("a".to_string(), "1".to_string());
        store.put("b".to_string(), "2".to_string());
        store.put("a".to_string(), "3".to_string());

        assert_eq!(store.len(), 2);
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_store_stats() {
        let mut store = store(100);

        store.put("k".to_string(), "v".to_string());
        store.get("k");
        store.get("nonexistent");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_store_cleanup_expired() {
        let mut store = store(100);
        let ttl = store.settings().ttl;
        let start = Instant::now();

        store.put_at("old".to_string(), "v".to_string(), start);
        store.put_at("new".to_string(), "v".to_string(), start + ttl / 2);

        assert_eq!(store.cleanup_expired_at(start + ttl), 1);
        assert_eq!(store.len(), 1);
        assert!(store.contains_key("new"));
    }
}
