//! Request and Response models
//!
//! Upstream OMDb payloads, the normalized media responses handed to callers,
//! and the DTOs of the maintenance endpoints.

pub mod media;
pub mod omdb;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use media::{
    DetailsResponse, EpisodeDetailsResponse, EpisodeSummary, MovieSearchResponse, Rating,
    SearchPage, SeasonDetailsResponse, SeriesSearchResponse, TitleSummary, ITEMS_PER_PAGE,
};
pub use requests::{DetailsQuery, EpisodeQuery, SearchQuery, SeasonQuery, TitleQuery};
pub use responses::{
    CacheStatsResponse, ClearResponse, ErrorResponse, EvictResponse, HealthResponse,
    RegionStatsResponse,
};
