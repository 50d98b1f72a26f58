//! Upstream Module
//!
//! The metadata API this service fronts. Callers only see the [`OmdbClient`]
//! trait, so the services can be exercised against a canned client in tests.

mod http;

pub use http::HttpOmdbClient;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors raised while talking to the upstream API.
///
/// The cache layer never produces these; it only forwards them untouched.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The request could not be sent or timed out
    #[error("Request failed: {0}")]
    Request(String),

    /// The upstream answered with a non-success status
    #[error("Upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The payload could not be decoded
    #[error("Failed to parse upstream response: {0}")]
    Parse(String),
}

/// Restricts title and search lookups to one kind of media.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Movie,
    Series,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "series",
        }
    }
}

/// A single upstream lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OmdbQuery {
    /// `?t=`: best match for a title
    Title { title: String, kind: MediaKind },
    /// `?s=&page=`: one page of title search results
    Search {
        title: String,
        kind: MediaKind,
        page: u32,
    },
    /// `?i=&plot=`: lookup by IMDb id
    Id { id: String, plot: String },
    /// `?i=&Season=`: season listing of a series
    Season { series_id: String, season: String },
    /// `?i=&Season=&Episode=`: a single episode
    Episode {
        series_id: String,
        season: String,
        episode: String,
    },
}

impl OmdbQuery {
    // == Query Parameters ==
    /// Query-string pairs for this lookup, without the API key.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            OmdbQuery::Title { title, kind } => vec![
                ("t", title.clone()),
                ("type", kind.as_str().to_string()),
            ],
            OmdbQuery::Search { title, kind, page } => vec![
                ("s", title.clone()),
                ("type", kind.as_str().to_string()),
                ("page", page.to_string()),
            ],
            OmdbQuery::Id { id, plot } => vec![("i", id.clone()), ("plot", plot.clone())],
            OmdbQuery::Season { series_id, season } => {
                vec![("i", series_id.clone()), ("Season", season.clone())]
            }
            OmdbQuery::Episode {
                series_id,
                season,
                episode,
            } => vec![
                ("i", series_id.clone()),
                ("Season", season.clone()),
                ("Episode", episode.clone()),
            ],
        }
    }
}

/// Client for the upstream metadata API.
#[async_trait]
pub trait OmdbClient: Send + Sync {
    /// Performs `query` and returns the raw JSON payload.
    ///
    /// `Ok(None)` means the upstream answered with an empty or `null` body.
    async fn fetch(&self, query: &OmdbQuery) -> Result<Option<Value>, UpstreamError>;
}

/// Decodes a raw payload into an upstream DTO, keeping absence as `None`.
pub fn decode<T: serde::de::DeserializeOwned>(
    payload: Option<Value>,
) -> Result<Option<T>, UpstreamError> {
    match payload {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| UpstreamError::Parse(e.to_string())),
    }
}
