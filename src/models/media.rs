//! Normalized media responses
//!
//! Stable shapes returned to callers and stored in the cache regions. Every
//! response carries `success` and an optional `errorMessage`; only successful
//! responses are ever admitted into a cache region.

use serde::{Deserialize, Serialize};

/// Page size the upstream search endpoint uses.
pub const ITEMS_PER_PAGE: u32 = 10;

/// A `{source, value}` rating pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub source: Option<String>,
    pub value: Option<String>,
}

/// Full details for a movie or series, from a title or id lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsResponse {
    pub id: Option<String>,
    pub title: Option<String>,
    pub year: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub plot: Option<String>,
    pub rated: Option<String>,
    pub runtime: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub actors: Option<String>,
    pub writer: Option<String>,
    pub imdb_rating: Option<String>,
    pub imdb_votes: Option<String>,
    pub metascore: Option<String>,
    pub ratings: Vec<Rating>,
    pub poster: Option<String>,
    pub awards: Option<String>,
    pub released: Option<String>,
    pub dvd: Option<String>,
    pub box_office: Option<String>,
    pub total_seasons: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl DetailsResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: Some(message.into()),
            ..Default::default()
        }
    }
}

/// One hit in a search result page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleSummary {
    pub id: Option<String>,
    pub title: Option<String>,
    pub year: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub poster: Option<String>,
    pub available: bool,
}

/// Pagination and bookkeeping shared by movie and series search pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub total_results: u32,
    pub current_page: u32,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub search_term: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_type: Option<String>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Milliseconds spent producing the page
    pub search_time: u64,
    pub items_per_page: u32,
}

impl SearchPage {
    // == Pagination ==
    /// Builds a successful page from the upstream total and requested page.
    pub fn paginate(search_term: &str, current_page: u32, total_results: u32, search_time: u64) -> Self {
        let total_pages = total_results.div_ceil(ITEMS_PER_PAGE);
        Self {
            total_results,
            current_page,
            total_pages,
            has_next_page: current_page < total_pages,
            has_previous_page: current_page > 1,
            search_term: search_term.to_string(),
            search_type: Some("title".to_string()),
            success: true,
            error_message: None,
            search_time,
            items_per_page: ITEMS_PER_PAGE,
        }
    }

    /// Builds a failed page carrying `message`.
    pub fn failure(search_term: &str, current_page: u32, search_time: u64, message: impl Into<String>) -> Self {
        Self {
            current_page,
            search_term: search_term.to_string(),
            success: false,
            error_message: Some(message.into()),
            search_time,
            ..Default::default()
        }
    }
}

/// A page of movie search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSearchResponse {
    pub movies: Vec<TitleSummary>,
    #[serde(flatten)]
    pub page: SearchPage,
}

/// A page of series search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSearchResponse {
    pub series: Vec<TitleSummary>,
    #[serde(flatten)]
    pub page: SearchPage,
}

/// One row of a season's episode listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeSummary {
    pub title: Option<String>,
    pub released: Option<String>,
    pub episode: Option<String>,
    pub imdb_rating: Option<String>,
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
}

/// A season with its episode listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonDetailsResponse {
    pub title: Option<String>,
    pub season: Option<String>,
    pub total_seasons: Option<String>,
    pub episodes: Vec<EpisodeSummary>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl SeasonDetailsResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: Some(message.into()),
            ..Default::default()
        }
    }
}

/// Details for a single episode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeDetailsResponse {
    pub id: Option<String>,
    pub title: Option<String>,
    pub year: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub plot: Option<String>,
    pub rated: Option<String>,
    pub runtime: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub actors: Option<String>,
    pub writer: Option<String>,
    pub imdb_rating: Option<String>,
    pub imdb_votes: Option<String>,
    pub ratings: Vec<Rating>,
    pub poster: Option<String>,
    pub released: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub season: Option<String>,
    pub episode: Option<String>,
    #[serde(rename = "seriesID")]
    pub series_id: Option<String>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl EpisodeDetailsResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: Some(message.into()),
            ..Default::default()
        }
    }
}
