//! Service Module
//!
//! Cacheable media operations. Each operation validates its input, derives a
//! key for its region and runs the upstream lookup through that region's gate.

mod movies;
mod series;

pub use movies::MovieService;
pub use series::SeriesService;

use std::time::Instant;

use crate::error::ApiError;
use crate::models::omdb::{OmdbSearch, OmdbTitle};
use crate::models::{DetailsResponse, SearchPage, TitleSummary};
use crate::normalize;
use crate::upstream::{decode, OmdbClient, OmdbQuery, UpstreamError};

/// Shortest accepted search term, counted after trimming.
pub const MIN_SEARCH_LEN: usize = 3;

pub const TERM_TOO_SHORT: &str = "Search term too generic. Enter at least 3 characters.";
pub const NO_UPSTREAM_RESPONSE: &str = "No response from the OMDb API";

// == Validation ==
/// Returns the trimmed term when it is long enough to search for.
pub fn valid_term(term: &str) -> Option<&str> {
    let term = term.trim();
    (term.chars().count() >= MIN_SEARCH_LEN).then_some(term)
}

/// Like [`valid_term`], for operations that reject short terms outright.
pub fn require_term(term: &str) -> Result<&str, ApiError> {
    valid_term(term).ok_or_else(|| ApiError::InvalidRequest(TERM_TOO_SHORT.to_string()))
}

/// Pages below 1 are treated as page 1.
pub fn clamp_page(page: i64) -> u32 {
    u32::try_from(page.max(1)).unwrap_or(u32::MAX)
}

pub(crate) fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

// == Shared Lookups ==
/// Fetches a title or id lookup and normalizes it, turning misses into
/// `success = false` responses.
pub(crate) async fn fetch_details(
    client: &dyn OmdbClient,
    query: OmdbQuery,
    not_found: &str,
) -> Result<DetailsResponse, UpstreamError> {
    let raw: Option<OmdbTitle> = decode(client.fetch(&query).await?)?;
    let message = if raw.is_some() {
        not_found
    } else {
        NO_UPSTREAM_RESPONSE
    };
    Ok(normalize::details(raw).unwrap_or_else(|| DetailsResponse::failure(message)))
}

/// Fetches one page of search results and normalizes it.
pub(crate) async fn fetch_search(
    client: &dyn OmdbClient,
    query: OmdbQuery,
    term: &str,
    page: u32,
    started: Instant,
    not_found: &str,
) -> Result<(Vec<TitleSummary>, SearchPage), UpstreamError> {
    let raw: Option<OmdbSearch> = decode(client.fetch(&query).await?)?;
    let message = if raw.is_some() {
        not_found
    } else {
        NO_UPSTREAM_RESPONSE
    };
    Ok(
        normalize::search_page(raw, term, page, elapsed_ms(started)).unwrap_or_else(|| {
            (
                Vec::new(),
                SearchPage::failure(term, page, elapsed_ms(started), message),
            )
        }),
    )
}
