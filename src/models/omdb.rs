//! OMDb API payload types for deserialization.
//!
//! These mirror the upstream JSON, which uses PascalCase keys, strings for
//! every scalar and a `"Response": "True" | "False"` marker.

use serde::Deserialize;

/// Marker value the upstream uses for failed lookups.
const FALSE_MARKER: &str = "False";

/// A single title returned by `?t=` or `?i=` lookups.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OmdbTitle {
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Year")]
    pub year: Option<String>,
    #[serde(rename = "Rated")]
    pub rated: Option<String>,
    #[serde(rename = "Released")]
    pub released: Option<String>,
    #[serde(rename = "Runtime")]
    pub runtime: Option<String>,
    #[serde(rename = "Genre")]
    pub genre: Option<String>,
    #[serde(rename = "Director")]
    pub director: Option<String>,
    #[serde(rename = "Writer")]
    pub writer: Option<String>,
    #[serde(rename = "Actors")]
    pub actors: Option<String>,
    #[serde(rename = "Plot")]
    pub plot: Option<String>,
    #[serde(rename = "Language")]
    pub language: Option<String>,
    #[serde(rename = "Country")]
    pub country: Option<String>,
    #[serde(rename = "Awards")]
    pub awards: Option<String>,
    #[serde(rename = "Poster")]
    pub poster: Option<String>,
    #[serde(rename = "Ratings")]
    pub ratings: Option<Vec<OmdbRating>>,
    #[serde(rename = "Metascore")]
    pub metascore: Option<String>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "imdbVotes")]
    pub imdb_votes: Option<String>,
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
    #[serde(rename = "Type")]
    pub kind: Option<String>,
    #[serde(rename = "DVD")]
    pub dvd: Option<String>,
    #[serde(rename = "BoxOffice")]
    pub box_office: Option<String>,
    #[serde(rename = "totalSeasons")]
    pub total_seasons: Option<String>,
    #[serde(rename = "Response")]
    pub response: Option<String>,
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

impl OmdbTitle {
    pub fn is_false_response(&self) -> bool {
        is_false(&self.response)
    }
}

/// One entry of the `Ratings` array.
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbRating {
    #[serde(rename = "Source")]
    pub source: Option<String>,
    #[serde(rename = "Value")]
    pub value: Option<String>,
}

/// The `?s=` search payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OmdbSearch {
    #[serde(rename = "Search")]
    pub search: Option<Vec<OmdbSearchItem>>,
    #[serde(rename = "totalResults")]
    pub total_results: Option<String>,
    #[serde(rename = "Response")]
    pub response: Option<String>,
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

impl OmdbSearch {
    pub fn is_false_response(&self) -> bool {
        is_false(&self.response)
    }
}

/// A single hit inside a search payload.
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbSearchItem {
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Year")]
    pub year: Option<String>,
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
    #[serde(rename = "Type")]
    pub kind: Option<String>,
    #[serde(rename = "Poster")]
    pub poster: Option<String>,
}

/// The `?i=&Season=` payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OmdbSeason {
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Season")]
    pub season: Option<String>,
    // Absent on some season payloads
    #[serde(rename = "totalSeasons")]
    pub total_seasons: Option<String>,
    #[serde(rename = "Episodes")]
    pub episodes: Option<Vec<OmdbSeasonEpisode>>,
    #[serde(rename = "Response")]
    pub response: Option<String>,
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

impl OmdbSeason {
    pub fn is_false_response(&self) -> bool {
        is_false(&self.response)
    }
}

/// Episode row inside a season payload.
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbSeasonEpisode {
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Released")]
    pub released: Option<String>,
    #[serde(rename = "Episode")]
    pub episode: Option<String>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
}

/// The `?i=&Season=&Episode=` payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OmdbEpisode {
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Year")]
    pub year: Option<String>,
    #[serde(rename = "Rated")]
    pub rated: Option<String>,
    #[serde(rename = "Released")]
    pub released: Option<String>,
    #[serde(rename = "Season")]
    pub season: Option<String>,
    #[serde(rename = "Episode")]
    pub episode: Option<String>,
    #[serde(rename = "Runtime")]
    pub runtime: Option<String>,
    #[serde(rename = "Genre")]
    pub genre: Option<String>,
    #[serde(rename = "Director")]
    pub director: Option<String>,
    #[serde(rename = "Writer")]
    pub writer: Option<String>,
    #[serde(rename = "Actors")]
    pub actors: Option<String>,
    #[serde(rename = "Plot")]
    pub plot: Option<String>,
    #[serde(rename = "Language")]
    pub language: Option<String>,
    #[serde(rename = "Country")]
    pub country: Option<String>,
    #[serde(rename = "Poster")]
    pub poster: Option<String>,
    #[serde(rename = "Ratings")]
    pub ratings: Option<Vec<OmdbRating>>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "imdbVotes")]
    pub imdb_votes: Option<String>,
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
    #[serde(rename = "seriesID")]
    pub series_id: Option<String>,
    #[serde(rename = "Type")]
    pub kind: Option<String>,
    #[serde(rename = "Response")]
    pub response: Option<String>,
}

impl OmdbEpisode {
    pub fn is_false_response(&self) -> bool {
        is_false(&self.response)
    }
}

fn is_false(response: &Option<String>) -> bool {
    response.as_deref() == Some(FALSE_MARKER)
}
