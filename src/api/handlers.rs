//! API Handlers
//!
//! HTTP request handlers for the media endpoints and cache maintenance.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::cache::{CacheRegion, CacheRegistry};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    CacheStatsResponse, ClearResponse, DetailsQuery, DetailsResponse, EpisodeDetailsResponse,
    EpisodeQuery, EvictResponse, HealthResponse, MovieSearchResponse, RegionStatsResponse,
    SearchQuery, SeasonDetailsResponse, SeasonQuery, SeriesSearchResponse, TitleQuery,
};
use crate::service::{MovieService, SeriesService};
use crate::upstream::{HttpOmdbClient, OmdbClient, UpstreamError};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Every cache region, for the maintenance endpoints
    pub registry: Arc<CacheRegistry>,
    pub movies: Arc<MovieService>,
    pub series: Arc<SeriesService>,
}

impl AppState {
    /// Wires both services to `client` and the stores of `registry`.
    pub fn new(registry: Arc<CacheRegistry>, client: Arc<dyn OmdbClient>) -> Self {
        Self {
            movies: Arc::new(MovieService::new(client.clone(), &registry)),
            series: Arc::new(SeriesService::new(client, &registry)),
            registry,
        }
    }

    /// Creates a new AppState from configuration, talking to the real upstream.
    pub fn from_config(config: &Config) -> std::result::Result<Self, UpstreamError> {
        let client = HttpOmdbClient::new(
            config.omdb_base_url.clone(),
            config.omdb_api_key.clone(),
            config.upstream_timeout,
        )?;
        let registry = Arc::new(CacheRegistry::from_config(config));
        Ok(Self::new(registry, Arc::new(client)))
    }
}

// == Movies ==
/// Handler for GET /api/movies/search
pub async fn movie_search_handler(
    State(state): State<AppState>,
    Query(query): Query<TitleQuery>,
) -> Result<Json<DetailsResponse>> {
    Ok(Json(state.movies.search(&query.title).await?))
}

/// Handler for GET /api/movies/searchAll
pub async fn movie_search_all_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<MovieSearchResponse>> {
    Ok(Json(state.movies.search_all(&query.title, query.page).await?))
}

/// Handler for GET /api/movies/details
pub async fn movie_details_handler(
    State(state): State<AppState>,
    Query(query): Query<DetailsQuery>,
) -> Result<Json<DetailsResponse>> {
    Ok(Json(state.movies.details(&query.id, &query.plot).await?))
}

// == Series ==
/// Handler for GET /api/series/search
pub async fn series_search_handler(
    State(state): State<AppState>,
    Query(query): Query<TitleQuery>,
) -> Result<Json<DetailsResponse>> {
    Ok(Json(state.series.search(&query.title).await?))
}

/// Handler for GET /api/series/searchall
pub async fn series_search_all_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SeriesSearchResponse>> {
    Ok(Json(state.series.search_all(&query.title, query.page).await?))
}

/// Handler for GET /api/series/details
pub async fn series_details_handler(
    State(state): State<AppState>,
    Query(query): Query<DetailsQuery>,
) -> Result<Json<DetailsResponse>> {
    Ok(Json(state.series.details(&query.id, &query.plot).await?))
}

/// Handler for GET /api/series/season
///
/// Unknown seasons answer 404 with the failed body.
pub async fn season_handler(
    State(state): State<AppState>,
    Query(query): Query<SeasonQuery>,
) -> Result<(StatusCode, Json<SeasonDetailsResponse>)> {
    let response = state.series.season(&query.series_id, &query.season).await?;
    Ok((found_or_404(response.success), Json(response)))
}

/// Handler for GET /api/series/episode
///
/// Unknown episodes answer 404 with the failed body.
pub async fn episode_handler(
    State(state): State<AppState>,
    Query(query): Query<EpisodeQuery>,
) -> Result<(StatusCode, Json<EpisodeDetailsResponse>)> {
    let response = state
        .series
        .episode(&query.series_id, &query.season, &query.episode)
        .await?;
    Ok((found_or_404(response.success), Json(response)))
}

fn found_or_404(success: bool) -> StatusCode {
    if success {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

// == Cache Maintenance ==
/// Handler for GET /cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let mut regions = Vec::with_capacity(CacheRegion::ALL.len());
    for region in CacheRegion::ALL {
        let (stats, settings) = state.registry.stats(region).await;
        regions.push(RegionStatsResponse::new(region, &stats, settings));
    }
    Json(CacheStatsResponse { regions })
}

/// Handler for DELETE /cache/:region
pub async fn clear_handler(
    State(state): State<AppState>,
    Path(region): Path<String>,
) -> Result<Json<ClearResponse>> {
    let region = parse_region(&region)?;
    let removed = state.registry.clear(region).await;
    info!(region = %region, removed, "Cache region cleared");
    Ok(Json(ClearResponse::new(region, removed)))
}

/// Handler for DELETE /cache/:region/:key
pub async fn evict_handler(
    State(state): State<AppState>,
    Path((region, key)): Path<(String, String)>,
) -> Result<Json<EvictResponse>> {
    let region = parse_region(&region)?;
    if !state.registry.evict(region, &key).await {
        return Err(ApiError::NotFound(format!("Key not found: {}", key)));
    }
    info!(region = %region, key = %key, "Cache key evicted");
    Ok(Json(EvictResponse::new(region, key)))
}

fn parse_region(name: &str) -> Result<CacheRegion> {
    name.parse().map_err(ApiError::NotFound)
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::RegionSettings;
    use crate::service::testing::CountingClient;
    use serde_json::json;

    fn test_state() -> AppState {
        let client = CountingClient::new(|query| match query {
            crate::upstream::OmdbQuery::Season { .. } => Ok(Some(json!({"Response": "False"}))),
            _ => Ok(Some(json!({
                "Title": "The Matrix", "imdbID": "tt0133093", "Response": "True"
            }))),
        });
        let registry = Arc::new(CacheRegistry::uniform(RegionSettings::default()));
        AppState::new(registry, Arc::new(client))
    }

    #[tokio::test]
    async fn test_movie_search_handler() {
        let state = test_state();

        let query = TitleQuery {
            title: "Matrix".to_string(),
        };
        let response = movie_search_handler(State(state.clone()), Query(query))
            .await
            .unwrap();

        assert!(response.success);
        assert!(state
            .registry
            .contains_key(CacheRegion::MoviesByTitle, "matrix")
            .await);
    }

    #[tokio::test]
    async fn test_movie_search_handler_short_term() {
        let query = TitleQuery {
            title: "ma".to_string(),
        };
        let result = movie_search_handler(State(test_state()), Query(query)).await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_season_handler_not_found() {
        let query = SeasonQuery {
            series_id: "tt0903747".to_string(),
            season: "99".to_string(),
        };
        let (status, body) = season_handler(State(test_state()), Query(query))
            .await
            .unwrap();

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(!body.success);
    }

    #[tokio::test]
    async fn test_evict_handler() {
        let state = test_state();
        state.movies.details("tt0133093", "short").await.unwrap();

        let path = Path(("moviesById".to_string(), "tt0133093_short".to_string()));
        assert!(evict_handler(State(state.clone()), path).await.is_ok());

        let path = Path(("moviesById".to_string(), "tt0133093_short".to_string()));
        let result = evict_handler(State(state), path).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_clear_handler_unknown_region() {
        let result = clear_handler(State(test_state()), Path("nowhere".to_string())).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_stats_handler_lists_every_region() {
        let response = stats_handler(State(test_state())).await;
        assert_eq!(response.regions.len(), CacheRegion::ALL.len());
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
