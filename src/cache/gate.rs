//! Cache Gate Module
//!
//! Memoizes a fallible async operation in one region's store, admitting only
//! results that pass the region's admission predicate.

use std::future::Future;

use tracing::{debug, info};

use crate::cache::{CacheKey, SharedStore};

// == Admission ==
/// Decides whether a freshly computed value may be memoized.
pub trait Admission {
    /// Returns `true` when the value is a cacheable success.
    fn is_cacheable(&self) -> bool;
}

// == Cache Gate ==
/// Wraps cacheable operations for a single region.
///
/// On a hit the stored value is returned and the operation is never run. On
/// a miss the operation runs; an `Ok` value is stored only if `admit` accepts
/// it, and an `Err` is returned untouched without being stored.
///
/// Concurrent misses for the same key are not collapsed: each runs the
/// operation and the last `put` wins.
pub struct CacheGate<V> {
    store: SharedStore<V>,
    admit: fn(&V) -> bool,
}

impl<V: Clone> CacheGate<V> {
    // == Constructor ==
    pub fn new(store: SharedStore<V>, admit: fn(&V) -> bool) -> Self {
        Self { store, admit }
    }

    pub fn store(&self) -> &SharedStore<V> {
        &self.store
    }

    // == Invoke ==
    /// Returns the cached value for `key`, or computes it with `compute`.
    pub async fn invoke<F, Fut, E>(&self, key: &CacheKey, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let (region, cached) = {
            let mut store = self.store.write().await;
            (store.region(), store.get(key.as_str()))
        };

        if let Some(value) = cached {
            info!(region = %region, key = %key, "Cache hit");
            return Ok(value);
        }

        info!(region = %region, key = %key, "Cache miss, calling upstream");
        let value = compute().await?;

        if (self.admit)(&value) {
            self.store
                .write()
                .await
                .put(key.as_str().to_string(), value.clone());
            debug!(region = %region, key = %key, "Result admitted to cache");
        } else {
            debug!(region = %region, key = %key, "Result not admitted, leaving key empty");
        }

        Ok(value)
    }
}

impl<V: Clone + Admission> CacheGate<V> {
    /// Creates a gate that admits values reporting themselves cacheable.
    pub fn admitting_successes(store: SharedStore<V>) -> Self {
        Self::new(store, V::is_cacheable)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{keys, shared_store, CacheRegion, RegionSettings};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    struct Lookup {
        success: bool,
        title: String,
    }

    impl Admission for Lookup {
        fn is_cacheable(&self) -> bool {
            self.success
        }
    }

    fn gate() -> CacheGate<Lookup> {
        let store = shared_store(CacheRegion::MoviesByTitle, RegionSettings::default());
        CacheGate::admitting_successes(store)
    }

    fn found(title: &str) -> Lookup {
        Lookup {
            success: true,
            title: title.to_string(),
        }
    }

    fn missing() -> Lookup {
        Lookup {
            success: false,
            title: String::new(),
        }
    }

    #[tokio::test]
    async fn test_hit_avoids_recompute() {
        let gate = gate();
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let key = keys::title_key(Some("Matrix"));

        for _ in 0..2 {
            let result: Result<Lookup, String> = gate
                .invoke(&key, move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(found("The Matrix"))
                })
                .await;
            assert_eq!(result.unwrap(), found("The Matrix"));
        }

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rejected_result_is_not_cached() {
        let gate = gate();
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let key = keys::title_key(Some("NoSuchMovie"));

        for _ in 0..2 {
            let result: Result<Lookup, String> = gate
                .invoke(&key, move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(missing())
                })
                .await;
            assert!(!result.unwrap().success);
        }

        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert!(gate.store().write().await.get(key.as_str()).is_none());
    }

    #[tokio::test]
    async fn test_error_propagates_and_is_not_cached() {
        let gate = gate();
        let key = keys::title_key(Some("Matrix"));

        let result: Result<Lookup, String> = gate
            .invoke(&key, || async { Err("upstream down".to_string()) })
            .await;
        assert_eq!(result, Err("upstream down".to_string()));
        assert!(gate.store().read().await.is_empty());

        let result: Result<Lookup, String> =
            gate.invoke(&key, || async { Ok(found("The Matrix")) }).await;
        assert!(result.is_ok());
        assert!(gate.store().read().await.contains_key(key.as_str()));
    }

    #[tokio::test]
    async fn test_custom_predicate() {
        let store = shared_store(CacheRegion::SeriesSearch, RegionSettings::default());
        let gate: CacheGate<u32> = CacheGate::new(store, |n| *n > 10);

        let small: Result<u32, ()> = gate.invoke(&keys::title_key(Some("a")), || async { Ok(3) }).await;
        let large: Result<u32, ()> = gate.invoke(&keys::title_key(Some("b")), || async { Ok(30) }).await;

        assert_eq!(small, Ok(3));
        assert_eq!(large, Ok(30));
        let store = gate.store().read().await;
        assert!(!store.contains_key("a"));
        assert!(store.contains_key("b"));
    }

    #[tokio::test]
    async fn test_expired_entry_recomputes() {
        let store = shared_store(
            CacheRegion::SeriesEpisode,
            RegionSettings::new(10, Duration::from_millis(50)),
        );
        let gate = CacheGate::admitting_successes(store);
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let key = keys::episode_key("tt0903747", "1", "3");

        let compute = move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ()>(found("Gray Matter"))
        };

        gate.invoke(&key, compute).await.unwrap();
        gate.invoke(&key, compute).await.unwrap();
        tokio::time::sleep(Duration::from_millis(80)).await;
        gate.invoke(&key, compute).await.unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_concurrent_callers_observe_cached_value() {
        let gate = Arc::new(gate());
        let key = keys::title_key(Some("Matrix"));
        gate.invoke(&key, || async { Ok::<_, ()>(found("The Matrix")) })
            .await
            .unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let gate = Arc::clone(&gate);
            let key = key.clone();
            handles.push(tokio::spawn(async move {
                gate.invoke(&key, || async { Ok::<_, ()>(found("recomputed")) })
                    .await
                    .unwrap()
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap(), found("The Matrix"));
        }
    }
}
