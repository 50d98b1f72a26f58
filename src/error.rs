//! Error types for the proxy
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::warn;

use crate::cache::CacheRegion;
use crate::models::ErrorResponse;
use crate::upstream::UpstreamError;

// == API Error Enum ==
/// Unified error type for the HTTP layer.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid request data
    #[error("{0}")]
    InvalidRequest(String),

    /// Requested resource does not exist
    #[error("{0}")]
    NotFound(String),

    /// The upstream call failed; never cached
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl ApiError {
    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(UpstreamError::Status { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::Upstream(err) = &self {
            warn!(error = %err, "Upstream call failed");
        }

        let body = Json(ErrorResponse::new(self.to_string(), status.as_u16()));
        (status, body).into_response()
    }
}

// == Config Error Enum ==
/// Startup configuration problems.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("OMDB_API_KEY is not set")]
    MissingApiKey,

    #[error("Cache region {0} must hold at least one entry")]
    ZeroCapacity(CacheRegion),

    #[error("Cache region {0} must have a non-zero TTL")]
    ZeroTtl(CacheRegion),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP layer.
pub type Result<T> = std::result::Result<T, ApiError>;
