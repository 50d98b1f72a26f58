//! Request DTOs for the proxy API
//!
//! Query-string parameters of the media endpoints.

use serde::Deserialize;

fn default_page() -> i64 {
    1
}

fn default_plot() -> String {
    "short".to_string()
}

/// Query for `/search`: `?title=`
#[derive(Debug, Clone, Deserialize)]
pub struct TitleQuery {
    pub title: String,
}

/// Query for `/searchAll`: `?title=&page=`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub title: String,
    /// Requested page; anything below 1 is treated as page 1
    #[serde(default = "default_page")]
    pub page: i64,
}

/// Query for `/details`: `?id=&plot=`
#[derive(Debug, Clone, Deserialize)]
pub struct DetailsQuery {
    pub id: String,
    /// `short` or `full`
    #[serde(default = "default_plot")]
    pub plot: String,
}

/// Query for `/season`: `?seriesId=&season=`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonQuery {
    pub series_id: String,
    pub season: String,
}

/// Query for `/episode`: `?seriesId=&season=&episode=`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeQuery {
    pub series_id: String,
    pub season: String,
    pub episode: String,
}
