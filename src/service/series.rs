//! Series lookups, including season listings and single episodes.

use std::sync::Arc;
use std::time::Instant;

use crate::cache::{keys, CacheGate, CacheRegistry};
use crate::error::Result;
use crate::models::omdb::{OmdbEpisode, OmdbSeason};
use crate::models::{
    DetailsResponse, EpisodeDetailsResponse, SearchPage, SeasonDetailsResponse,
    SeriesSearchResponse,
};
use crate::normalize;
use crate::upstream::{decode, MediaKind, OmdbClient, OmdbQuery, UpstreamError};

use super::{
    clamp_page, elapsed_ms, fetch_details, fetch_search, require_term, valid_term, TERM_TOO_SHORT,
};

const SERIES_NOT_FOUND: &str = "Series not found";
const NO_SERIES_FOUND: &str = "No series found";
pub const SEASON_NOT_FOUND: &str = "Season not found";
pub const EPISODE_NOT_FOUND: &str = "Episode not found";

/// Series search, detail, season and episode lookups, memoized per region.
pub struct SeriesService {
    client: Arc<dyn OmdbClient>,
    by_title: CacheGate<DetailsResponse>,
    by_id: CacheGate<DetailsResponse>,
    search: CacheGate<SeriesSearchResponse>,
    season: CacheGate<SeasonDetailsResponse>,
    episode: CacheGate<EpisodeDetailsResponse>,
}

impl SeriesService {
    pub fn new(client: Arc<dyn OmdbClient>, registry: &CacheRegistry) -> Self {
        Self {
            client,
            by_title: CacheGate::admitting_successes(registry.series_by_title.clone()),
            by_id: CacheGate::admitting_successes(registry.series_by_id.clone()),
            search: CacheGate::admitting_successes(registry.series_search.clone()),
            season: CacheGate::admitting_successes(registry.series_season.clone()),
            episode: CacheGate::admitting_successes(registry.series_episode.clone()),
        }
    }

    // == Search ==
    pub async fn search(&self, title: &str) -> Result<DetailsResponse> {
        let term = require_term(title)?;
        let key = keys::title_key(Some(term));
        let query = OmdbQuery::Title {
            title: term.to_string(),
            kind: MediaKind::Series,
        };

        let response = self
            .by_title
            .invoke(&key, || {
                fetch_details(self.client.as_ref(), query, SERIES_NOT_FOUND)
            })
            .await?;
        Ok(response)
    }

    // == Search All ==
    pub async fn search_all(&self, title: &str, page: i64) -> Result<SeriesSearchResponse> {
        let started = Instant::now();
        let page = clamp_page(page);
        let Some(term) = valid_term(title) else {
            return Ok(SeriesSearchResponse {
                series: Vec::new(),
                page: SearchPage::failure(title.trim(), page, elapsed_ms(started), TERM_TOO_SHORT),
            });
        };

        let key = keys::search_key(Some(term), page);
        let query = OmdbQuery::Search {
            title: term.to_string(),
            kind: MediaKind::Series,
            page,
        };

        let response = self
            .search
            .invoke(&key, || async move {
                let (series, page) = fetch_search(
                    self.client.as_ref(),
                    query,
                    term,
                    page,
                    started,
                    NO_SERIES_FOUND,
                )
                .await?;
                Ok::<_, UpstreamError>(SeriesSearchResponse { series, page })
            })
            .await?;
        Ok(response)
    }

    // == Details ==
    pub async fn details(&self, id: &str, plot: &str) -> Result<DetailsResponse> {
        let key = keys::details_key(Some(id), plot);
        let query = OmdbQuery::Id {
            id: id.trim().to_string(),
            plot: plot.to_string(),
        };

        let response = self
            .by_id
            .invoke(&key, || {
                fetch_details(self.client.as_ref(), query, SERIES_NOT_FOUND)
            })
            .await?;
        Ok(response)
    }

    // == Season ==
    /// Episode listing of one season. Unknown seasons come back with
    /// `success = false` and are not cached.
    pub async fn season(&self, series_id: &str, season: &str) -> Result<SeasonDetailsResponse> {
        let key = keys::season_key(series_id, season);
        let query = OmdbQuery::Season {
            series_id: series_id.to_string(),
            season: season.to_string(),
        };

        let response = self
            .season
            .invoke(&key, || async move {
                let raw: Option<OmdbSeason> = decode(self.client.fetch(&query).await?)?;
                Ok::<_, UpstreamError>(
                    normalize::season(raw)
                        .unwrap_or_else(|| SeasonDetailsResponse::failure(SEASON_NOT_FOUND)),
                )
            })
            .await?;
        Ok(response)
    }

    // == Episode ==
    /// A single episode. Unknown episodes come back with `success = false`
    /// and are not cached.
    pub async fn episode(
        &self,
        series_id: &str,
        season: &str,
        episode: &str,
    ) -> Result<EpisodeDetailsResponse> {
        let key = keys::episode_key(series_id, season, episode);
        let query = OmdbQuery::Episode {
            series_id: series_id.to_string(),
            season: season.to_string(),
            episode: episode.to_string(),
        };

        let response = self
            .episode
            .invoke(&key, || async move {
                let raw: Option<OmdbEpisode> = decode(self.client.fetch(&query).await?)?;
                Ok::<_, UpstreamError>(
                    normalize::episode(raw)
                        .unwrap_or_else(|| EpisodeDetailsResponse::failure(EPISODE_NOT_FOUND)),
                )
            })
            .await?;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheRegion, RegionSettings};
    use crate::error::ApiError;
    use crate::service::testing::CountingClient;
    use serde_json::json;

    fn setup(client: CountingClient) -> (Arc<CountingClient>, Arc<CacheRegistry>, SeriesService) {
        let client = Arc::new(client);
        let registry = Arc::new(CacheRegistry::uniform(RegionSettings::default()));
        let service = SeriesService::new(client.clone(), &registry);
        (client, registry, service)
    }

    fn breaking_bad_client() -> CountingClient {
        CountingClient::new(|query| match query {
            OmdbQuery::Title { title, kind } => {
                assert_eq!(*kind, MediaKind::Series);
                if title.eq_ignore_ascii_case("breaking bad") {
                    Ok(Some(json!({
                        "Title": "Breaking Bad", "imdbID": "tt0903747",
                        "totalSeasons": "5", "Type": "series", "Response": "True"
                    })))
                } else {
                    Ok(Some(json!({"Response": "False", "Error": "Series not found!"})))
                }
            }
            OmdbQuery::Search { .. } => Ok(Some(json!({
                "Search": [{"Title": "Breaking Bad", "imdbID": "tt0903747", "Type": "series"}],
                "totalResults": "1", "Response": "True"
            }))),
            OmdbQuery::Season { season, .. } if season == "1" => Ok(Some(json!({
                "Title": "Breaking Bad", "Season": "1", "totalSeasons": "5",
                "Episodes": [{"Title": "Pilot", "Episode": "1", "imdbID": "tt0959621"}],
                "Response": "True"
            }))),
            OmdbQuery::Episode { episode, .. } if episode == "5" => Ok(Some(json!({
                "Title": "Gray Matter", "Season": "1", "Episode": "5",
                "seriesID": "tt0903747", "Response": "True"
            }))),
            OmdbQuery::Episode { .. } => Ok(Some(json!({"Response": "True"}))),
            _ => Ok(Some(json!({"Response": "False", "Error": "Incorrect IMDb ID."}))),
        })
    }

    #[tokio::test]
    async fn test_search_uses_series_region() {
        let (client, registry, service) = setup(breaking_bad_client());

        let response = service.search("Breaking Bad").await.unwrap();
        service.search("breaking bad").await.unwrap();

        assert_eq!(response.total_seasons.as_deref(), Some("5"));
        assert_eq!(client.calls(), 1);
        assert!(registry.contains_key(CacheRegion::SeriesByTitle, "breaking bad").await);
        assert!(!registry.contains_key(CacheRegion::MoviesByTitle, "breaking bad").await);
    }

    #[tokio::test]
    async fn test_short_term_is_rejected() {
        let (client, _registry, service) = setup(breaking_bad_client());

        assert!(matches!(service.search("bb").await, Err(ApiError::InvalidRequest(_))));
        assert!(!service.search_all("bb", 1).await.unwrap().page.success);
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn test_search_all_is_cached() {
        let (client, registry, service) = setup(breaking_bad_client());

        let response = service.search_all("Breaking", -1).await.unwrap();
        service.search_all("breaking", 1).await.unwrap();

        assert_eq!(response.series.len(), 1);
        assert_eq!(response.page.current_page, 1);
        assert!(!response.page.has_next_page);
        assert_eq!(client.calls(), 1);
        assert!(registry.contains_key(CacheRegion::SeriesSearch, "breaking_page_1").await);
    }

    #[tokio::test]
    async fn test_season_is_cached_with_raw_key() {
        let (client, registry, service) = setup(breaking_bad_client());

        let response = service.season("tt0903747", "1").await.unwrap();
        service.season("tt0903747", "1").await.unwrap();

        assert!(response.success);
        assert_eq!(response.episodes.len(), 1);
        assert_eq!(client.calls(), 1);
        assert!(registry.contains_key(CacheRegion::SeriesSeason, "tt0903747_1").await);
    }

    #[tokio::test]
    async fn test_unknown_season_is_not_cached() {
        let (client, registry, service) = setup(breaking_bad_client());

        let response = service.season("tt0903747", "99").await.unwrap();
        service.season("tt0903747", "99").await.unwrap();

        assert!(!response.success);
        assert_eq!(response.error_message.as_deref(), Some(SEASON_NOT_FOUND));
        assert_eq!(client.calls(), 2);
        assert_eq!(registry.len(CacheRegion::SeriesSeason).await, 0);
    }

    #[tokio::test]
    async fn test_episode() {
        let (client, registry, service) = setup(breaking_bad_client());

        let found = service.episode("tt0903747", "1", "5").await.unwrap();
        service.episode("tt0903747", "1", "5").await.unwrap();
        let missing = service.episode("tt0903747", "1", "42").await.unwrap();

        assert!(found.success);
        assert_eq!(found.title.as_deref(), Some("Gray Matter"));
        assert!(!missing.success);
        assert_eq!(missing.error_message.as_deref(), Some(EPISODE_NOT_FOUND));
        assert_eq!(client.calls(), 2);
        assert!(registry.contains_key(CacheRegion::SeriesEpisode, "tt0903747_1_5").await);
        assert!(!registry.contains_key(CacheRegion::SeriesEpisode, "tt0903747_1_42").await);
    }

    #[tokio::test]
    async fn test_details_not_found() {
        let (client, _registry, service) = setup(breaking_bad_client());

        let response = service.details("tt9999999", "full").await.unwrap();
        service.details("tt9999999", "full").await.unwrap();

        assert!(!response.success);
        assert_eq!(response.error_message.as_deref(), Some(SERIES_NOT_FOUND));
        assert_eq!(client.calls(), 2);
    }
}
