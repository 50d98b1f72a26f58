//! API Routes
//!
//! Configures the Axum router with the media and cache maintenance endpoints.

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, episode_handler, evict_handler, health_handler, movie_details_handler,
    movie_search_all_handler, movie_search_handler, season_handler, series_details_handler,
    series_search_all_handler, series_search_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/movies/search`, `/api/movies/searchAll`, `/api/movies/details`
/// - `GET /api/series/search`, `/api/series/searchall`, `/api/series/details`
/// - `GET /api/series/season`, `/api/series/episode`
/// - `GET /cache/stats` - Per-region cache statistics
/// - `DELETE /cache/:region` - Clear a region
/// - `DELETE /cache/:region/:key` - Evict one key
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let movies = Router::new()
        .route("/search", get(movie_search_handler))
        .route("/searchAll", get(movie_search_all_handler))
        .route("/details", get(movie_details_handler));

    let series = Router::new()
        .route("/search", get(series_search_handler))
        .route("/searchall", get(series_search_all_handler))
        .route("/details", get(series_details_handler))
        .route("/season", get(season_handler))
        .route("/episode", get(episode_handler));

    Router::new()
        .nest("/api/movies", movies)
        .nest("/api/series", series)
        .route("/cache/stats", get(stats_handler))
        .route("/cache/:region", delete(clear_handler))
        .route("/cache/:region/:key", delete(evict_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
