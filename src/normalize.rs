//! Response Normalization
//!
//! Turns raw OMDb payloads into the stable response shapes and defines which
//! of those responses may be admitted into a cache region.
//!
//! A payload is a failure when it is absent (`null` upstream body) or carries
//! the `"Response": "False"` marker. Failures become `success = false`
//! responses, which the [`Admission`] impls below keep out of the cache.

use crate::cache::Admission;
use crate::models::omdb::{
    OmdbEpisode, OmdbRating, OmdbSearch, OmdbSearchItem, OmdbSeason, OmdbSeasonEpisode, OmdbTitle,
};
use crate::models::{
    DetailsResponse, EpisodeDetailsResponse, EpisodeSummary, MovieSearchResponse, Rating,
    SearchPage, SeasonDetailsResponse, SeriesSearchResponse, TitleSummary,
};

// == Admission ==
impl Admission for DetailsResponse {
    fn is_cacheable(&self) -> bool {
        self.success
    }
}

impl Admission for MovieSearchResponse {
    fn is_cacheable(&self) -> bool {
        self.page.success
    }
}

impl Admission for SeriesSearchResponse {
    fn is_cacheable(&self) -> bool {
        self.page.success
    }
}

impl Admission for SeasonDetailsResponse {
    fn is_cacheable(&self) -> bool {
        self.success
    }
}

impl Admission for EpisodeDetailsResponse {
    fn is_cacheable(&self) -> bool {
        self.success
    }
}

// == Details ==
/// Normalizes a title/id lookup. Returns `None` for absent or failed payloads.
pub fn details(raw: Option<OmdbTitle>) -> Option<DetailsResponse> {
    let raw = raw.filter(|raw| !raw.is_false_response())?;
    Some(DetailsResponse {
        id: raw.imdb_id,
        title: raw.title,
        year: raw.year,
        genre: raw.genre,
        director: raw.director,
        plot: raw.plot,
        rated: raw.rated,
        runtime: raw.runtime,
        language: raw.language,
        country: raw.country,
        actors: raw.actors,
        writer: raw.writer,
        imdb_rating: raw.imdb_rating,
        imdb_votes: raw.imdb_votes,
        metascore: raw.metascore,
        ratings: ratings(raw.ratings),
        poster: raw.poster,
        awards: raw.awards,
        released: raw.released,
        dvd: raw.dvd,
        box_office: raw.box_office,
        total_seasons: raw.total_seasons,
        kind: raw.kind,
        success: true,
        error_message: None,
    })
}

// == Search ==
/// Normalizes a search payload into its hits and pagination block.
///
/// Returns `None` for absent or failed payloads.
pub fn search_page(
    raw: Option<OmdbSearch>,
    search_term: &str,
    current_page: u32,
    search_time: u64,
) -> Option<(Vec<TitleSummary>, SearchPage)> {
    let raw = raw.filter(|raw| !raw.is_false_response())?;
    let total_results = parse_count(raw.total_results.as_deref());
    let hits = raw
        .search
        .unwrap_or_default()
        .into_iter()
        .map(summary)
        .collect();
    Some((
        hits,
        SearchPage::paginate(search_term, current_page, total_results, search_time),
    ))
}

fn summary(item: OmdbSearchItem) -> TitleSummary {
    TitleSummary {
        id: item.imdb_id,
        title: item.title,
        year: item.year,
        kind: item.kind,
        poster: item.poster,
        available: true,
    }
}

// == Season ==
/// Normalizes a season payload. Returns `None` for absent or failed payloads.
pub fn season(raw: Option<OmdbSeason>) -> Option<SeasonDetailsResponse> {
    let raw = raw.filter(|raw| !raw.is_false_response())?;
    Some(SeasonDetailsResponse {
        title: raw.title,
        season: raw.season,
        total_seasons: raw.total_seasons,
        episodes: raw
            .episodes
            .unwrap_or_default()
            .into_iter()
            .map(episode_summary)
            .collect(),
        success: true,
        error_message: None,
    })
}

fn episode_summary(raw: OmdbSeasonEpisode) -> EpisodeSummary {
    EpisodeSummary {
        title: raw.title,
        released: raw.released,
        episode: raw.episode,
        imdb_rating: raw.imdb_rating,
        imdb_id: raw.imdb_id,
    }
}

// == Episode ==
/// Normalizes an episode payload.
///
/// The upstream does not always send a `False` marker for unknown episodes,
/// so a payload without a title also counts as not found.
pub fn episode(raw: Option<OmdbEpisode>) -> Option<EpisodeDetailsResponse> {
    let raw = raw.filter(|raw| !raw.is_false_response() && raw.title.is_some())?;
    Some(EpisodeDetailsResponse {
        id: raw.imdb_id,
        title: raw.title,
        year: raw.year,
        genre: raw.genre,
        director: raw.director,
        plot: raw.plot,
        rated: raw.rated,
        runtime: raw.runtime,
        language: raw.language,
        country: raw.country,
        actors: raw.actors,
        writer: raw.writer,
        imdb_rating: raw.imdb_rating,
        imdb_votes: raw.imdb_votes,
        ratings: ratings(raw.ratings),
        poster: raw.poster,
        released: raw.released,
        kind: raw.kind,
        season: raw.season,
        episode: raw.episode,
        series_id: raw.series_id,
        success: true,
        error_message: None,
    })
}

fn ratings(raw: Option<Vec<OmdbRating>>) -> Vec<Rating> {
    raw.unwrap_or_default()
        .into_iter()
        .map(|rating| Rating {
            source: rating.source,
            value: rating.value,
        })
        .collect()
}

/// Parses an upstream count such as `"42"`; anything unparseable counts as zero.
pub fn parse_count(value: Option<&str>) -> u32 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(0)
}
