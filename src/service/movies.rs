//! Movie lookups.

use std::sync::Arc;
use std::time::Instant;

use crate::cache::{keys, CacheGate, CacheRegistry};
use crate::error::Result;
use crate::models::{DetailsResponse, MovieSearchResponse, SearchPage};
use crate::upstream::{MediaKind, OmdbClient, OmdbQuery, UpstreamError};

use super::{
    clamp_page, elapsed_ms, fetch_details, fetch_search, require_term, valid_term, TERM_TOO_SHORT,
};

const MOVIE_NOT_FOUND: &str = "Movie not found";
const NO_MOVIES_FOUND: &str = "No movies found";

/// Movie search and detail lookups, memoized per region.
pub struct MovieService {
    client: Arc<dyn OmdbClient>,
    by_title: CacheGate<DetailsResponse>,
    by_id: CacheGate<DetailsResponse>,
    search: CacheGate<MovieSearchResponse>,
}

impl MovieService {
    pub fn new(client: Arc<dyn OmdbClient>, registry: &CacheRegistry) -> Self {
        Self {
            client,
            by_title: CacheGate::admitting_successes(registry.movies_by_title.clone()),
            by_id: CacheGate::admitting_successes(registry.movies_by_id.clone()),
            search: CacheGate::admitting_successes(registry.movie_search.clone()),
        }
    }

    // == Search ==
    /// Best match for `title`. Terms shorter than three characters are rejected
    /// without touching the cache or the upstream.
    pub async fn search(&self, title: &str) -> Result<DetailsResponse> {
        let term = require_term(title)?;
        let key = keys::title_key(Some(term));
        let query = OmdbQuery::Title {
            title: term.to_string(),
            kind: MediaKind::Movie,
        };

        let response = self
            .by_title
            .invoke(&key, || {
                fetch_details(self.client.as_ref(), query, MOVIE_NOT_FOUND)
            })
            .await?;
        Ok(response)
    }

    // == Search All ==
    /// One page of search results for `title`.
    pub async fn search_all(&self, title: &str, page: i64) -> Result<MovieSearchResponse> {
        let started = Instant::now();
        let page = clamp_page(page);
        let Some(term) = valid_term(title) else {
            return Ok(MovieSearchResponse {
                movies: Vec::new(),
                page: SearchPage::failure(title.trim(), page, elapsed_ms(started), TERM_TOO_SHORT),
            });
        };

        let key = keys::search_key(Some(term), page);
        let query = OmdbQuery::Search {
            title: term.to_string(),
            kind: MediaKind::Movie,
            page,
        };

        let response = self
            .search
            .invoke(&key, || async move {
                let (movies, page) = fetch_search(
                    self.client.as_ref(),
                    query,
                    term,
                    page,
                    started,
                    NO_MOVIES_FOUND,
                )
                .await?;
                Ok::<_, UpstreamError>(MovieSearchResponse { movies, page })
            })
            .await?;
        Ok(response)
    }

    // == Details ==
    /// Lookup by IMDb id with the requested plot variant.
    pub async fn details(&self, id: &str, plot: &str) -> Result<DetailsResponse> {
        let key = keys::details_key(Some(id), plot);
        let query = OmdbQuery::Id {
            id: id.trim().to_string(),
            plot: plot.to_string(),
        };

        let response = self
            .by_id
            .invoke(&key, || {
                fetch_details(self.client.as_ref(), query, MOVIE_NOT_FOUND)
            })
            .await?;
        Ok(response)
    }
}
