//! Cache Region Module
//!
//! The fixed set of named cache regions, one per cacheable operation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// == Cache Region ==
/// Identifies one independently sized and expiring cache store.
///
/// The set is closed: regions are known at compile time and built once at
/// startup by the [`CacheRegistry`](crate::cache::CacheRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CacheRegion {
    MoviesByTitle,
    MoviesById,
    MovieSearch,
    SeriesByTitle,
    SeriesById,
    SeriesSearch,
    SeriesSeason,
    SeriesEpisode,
}

impl CacheRegion {
    /// Every region, in registry order.
    pub const ALL: [CacheRegion; 8] = [
        CacheRegion::MoviesByTitle,
        CacheRegion::MoviesById,
        CacheRegion::MovieSearch,
        CacheRegion::SeriesByTitle,
        CacheRegion::SeriesById,
        CacheRegion::SeriesSearch,
        CacheRegion::SeriesSeason,
        CacheRegion::SeriesEpisode,
    ];

    // == Name ==
    /// Returns the public region name used in logs and the maintenance API.
    pub fn name(self) -> &'static str {
        match self {
            CacheRegion::MoviesByTitle => "moviesByTitle",
            CacheRegion::MoviesById => "moviesById",
            CacheRegion::MovieSearch => "movieSearch",
            CacheRegion::SeriesByTitle => "seriesByTitle",
            CacheRegion::SeriesById => "seriesById",
            CacheRegion::SeriesSearch => "seriesSearch",
            CacheRegion::SeriesSeason => "seriesSeason",
            CacheRegion::SeriesEpisode => "seriesEpisode",
        }
    }

    // == Env Prefix ==
    /// Prefix for per-region environment overrides, e.g. `CACHE_MOVIES_BY_TITLE`.
    pub fn env_prefix(self) -> &'static str {
        match self {
            CacheRegion::MoviesByTitle => "CACHE_MOVIES_BY_TITLE",
            CacheRegion::MoviesById => "CACHE_MOVIES_BY_ID",
            CacheRegion::MovieSearch => "CACHE_MOVIE_SEARCH",
            CacheRegion::SeriesByTitle => "CACHE_SERIES_BY_TITLE",
            CacheRegion::SeriesById => "CACHE_SERIES_BY_ID",
            CacheRegion::SeriesSearch => "CACHE_SERIES_SEARCH",
            CacheRegion::SeriesSeason => "CACHE_SERIES_SEASON",
            CacheRegion::SeriesEpisode => "CACHE_SERIES_EPISODE",
        }
    }
}

impl fmt::Display for CacheRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CacheRegion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CacheRegion::ALL
            .into_iter()
            .find(|region| region.name() == s)
            .ok_or_else(|| format!("Unknown cache region: {}", s))
    }
}
