//! Cache Registry Module
//!
//! Owns one store per region. Built once at startup and shared by `Arc` with
//! the services (through their gates) and the maintenance endpoints.

use tracing::info;

use crate::cache::{shared_store, CacheRegion, CacheStats, RegionSettings, SharedStore};
use crate::config::Config;
use crate::models::{
    DetailsResponse, EpisodeDetailsResponse, MovieSearchResponse, SeasonDetailsResponse,
    SeriesSearchResponse,
};

// Runs `$body` against the store of `$region`, whatever its value type.
macro_rules! with_store {
    ($registry:expr, $region:expr, |$store:ident| $body:expr) => {
        match $region {
            CacheRegion::MoviesByTitle => {
                let $store = &$registry.movies_by_title;
                $body
            }
            CacheRegion::MoviesById => {
                let $store = &$registry.movies_by_id;
                $body
            }
            CacheRegion::MovieSearch => {
                let $store = &$registry.movie_search;
                $body
            }
            CacheRegion::SeriesByTitle => {
                let $store = &$registry.series_by_title;
                $body
            }
            CacheRegion::SeriesById => {
                let $store = &$registry.series_by_id;
                $body
            }
            CacheRegion::SeriesSearch => {
                let $store = &$registry.series_search;
                $body
            }
            CacheRegion::SeriesSeason => {
                let $store = &$registry.series_season;
                $body
            }
            CacheRegion::SeriesEpisode => {
                let $store = &$registry.series_episode;
                $body
            }
        }
    };
}

// == Cache Registry ==
/// Explicit map from region to its typed store.
#[derive(Debug)]
pub struct CacheRegistry {
    pub movies_by_title: SharedStore<DetailsResponse>,
    pub movies_by_id: SharedStore<DetailsResponse>,
    pub movie_search: SharedStore<MovieSearchResponse>,
    pub series_by_title: SharedStore<DetailsResponse>,
    pub series_by_id: SharedStore<DetailsResponse>,
    pub series_search: SharedStore<SeriesSearchResponse>,
    pub series_season: SharedStore<SeasonDetailsResponse>,
    pub series_episode: SharedStore<EpisodeDetailsResponse>,
}

impl CacheRegistry {
    // == Constructor ==
    /// Builds every region with settings chosen by `settings_for`.
    pub fn new(settings_for: impl Fn(CacheRegion) -> RegionSettings) -> Self {
        fn build<V: Clone>(
            region: CacheRegion,
            settings_for: &impl Fn(CacheRegion) -> RegionSettings,
        ) -> SharedStore<V> {
            shared_store(region, settings_for(region))
        }

        Self {
            movies_by_title: build(CacheRegion::MoviesByTitle, &settings_for),
            movies_by_id: build(CacheRegion::MoviesById, &settings_for),
            movie_search: build(CacheRegion::MovieSearch, &settings_for),
            series_by_title: build(CacheRegion::SeriesByTitle, &settings_for),
            series_by_id: build(CacheRegion::SeriesById, &settings_for),
            series_search: build(CacheRegion::SeriesSearch, &settings_for),
            series_season: build(CacheRegion::SeriesSeason, &settings_for),
            series_episode: build(CacheRegion::SeriesEpisode, &settings_for),
        }
    }

    /// Builds every region with the same settings.
    pub fn uniform(settings: RegionSettings) -> Self {
        Self::new(|_| settings)
    }

    /// Builds every region from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        let registry = Self::new(|region| config.region_settings(region));
        for region in CacheRegion::ALL {
            let settings = config.region_settings(region);
            info!(
                region = %region,
                max_entries = settings.max_entries,
                ttl_secs = settings.ttl.as_secs(),
                "Cache region initialized"
            );
        }
        registry
    }

    // == Stats ==
    /// Returns the counters and settings of `region`.
    pub async fn stats(&self, region: CacheRegion) -> (CacheStats, RegionSettings) {
        with_store!(self, region, |store| {
            let store = store.read().await;
            (store.stats(), store.settings())
        })
    }

    /// Returns the number of entries stored in `region`.
    pub async fn len(&self, region: CacheRegion) -> usize {
        with_store!(self, region, |store| store.read().await.len())
    }

    /// Checks if `key` is stored in `region`.
    pub async fn contains_key(&self, region: CacheRegion, key: &str) -> bool {
        with_store!(self, region, |store| store.read().await.contains_key(key))
    }

    // == Evict ==
    /// Removes `key` from `region`, returning whether it was present.
    pub async fn evict(&self, region: CacheRegion, key: &str) -> bool {
        with_store!(self, region, |store| store.write().await.evict(key))
    }

    // == Clear ==
    /// Empties `region`, returning how many entries were dropped.
    pub async fn clear(&self, region: CacheRegion) -> usize {
        with_store!(self, region, |store| store.write().await.clear())
    }

    // == Cleanup Expired ==
    /// Sweeps expired entries from every region, returning the total removed.
    pub async fn cleanup_expired(&self) -> usize {
        let mut removed = 0;
        for region in CacheRegion::ALL {
            removed += with_store!(self, region, |store| store.write().await.cleanup_expired());
        }
        removed
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn detail(title: &str) -> DetailsResponse {
        DetailsResponse {
            title: Some(title.to_string()),
            success: true,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_regions_are_independent() {
        let registry = CacheRegistry::uniform(RegionSettings::default());

        registry
            .movies_by_title
            .write()
            .await
            .put("matrix".to_string(), detail("The Matrix"));

        assert!(registry.contains_key(CacheRegion::MoviesByTitle, "matrix").await);
        assert!(!registry.contains_key(CacheRegion::SeriesByTitle, "matrix").await);
        assert_eq!(registry.len(CacheRegion::MoviesById).await, 0);
    }

    #[tokio::test]
    async fn test_regions_do_not_share_capacity() {
        let registry = CacheRegistry::uniform(RegionSettings::new(1, Duration::from_secs(60)));

        registry
            .movies_by_title
            .write()
            .await
            .put("a".to_string(), detail("A"));
        registry
            .series_by_title
            .write()
            .await
            .put("b".to_string(), detail("B"));

        assert_eq!(registry.len(CacheRegion::MoviesByTitle).await, 1);
        assert_eq!(registry.len(CacheRegion::SeriesByTitle).await, 1);
    }

    #[tokio::test]
    async fn test_per_region_settings() {
        let registry = CacheRegistry::new(|region| match region {
            CacheRegion::SeriesEpisode => RegionSettings::new(10, Duration::from_secs(60)),
            _ => RegionSettings::default(),
        });

        let (_, episode) = registry.stats(CacheRegion::SeriesEpisode).await;
        let (_, movies) = registry.stats(CacheRegion::MoviesByTitle).await;
        assert_eq!(episode.max_entries, 10);
        assert_eq!(movies, RegionSettings::default());
    }

    #[tokio::test]
    async fn test_evict_and_clear() {
        let registry = CacheRegistry::uniform(RegionSettings::default());
        {
            let mut store = registry.movies_by_id.write().await;
            store.put("tt0133093_short".to_string(), detail("The Matrix"));
            store.put("tt0133093_full".to_string(), detail("The Matrix"));
        }

        assert!(registry.evict(CacheRegion::MoviesById, "tt0133093_short").await);
        assert!(!registry.evict(CacheRegion::MoviesById, "tt0133093_short").await);
        assert_eq!(registry.clear(CacheRegion::MoviesById).await, 1);
        assert_eq!(registry.len(CacheRegion::MoviesById).await, 0);
    }

    #[tokio::test]
    async fn test_cleanup_expired_sweeps_all_regions() {
        let registry = CacheRegistry::uniform(RegionSettings::new(10, Duration::from_millis(30)));
        registry
            .movies_by_title
            .write()
            .await
            .put("a".to_string(), detail("A"));
        registry
            .series_by_id
            .write()
            .await
            .put("b".to_string(), detail("B"));

        tokio::time::sleep(Duration::from_millis(60)).await;

        assert_eq!(registry.cleanup_expired().await, 2);
    }
}
