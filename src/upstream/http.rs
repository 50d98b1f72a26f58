//! OMDb HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{OmdbClient, OmdbQuery, UpstreamError};

/// [`OmdbClient`] backed by `reqwest` against the public OMDb endpoint.
pub struct HttpOmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpOmdbClient {
    /// Creates a client for `base_url` with a per-request `timeout`.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl OmdbClient for HttpOmdbClient {
    async fn fetch(&self, query: &OmdbQuery) -> Result<Option<Value>, UpstreamError> {
        debug!(?query, "Calling upstream");

        let mut params = query.params();
        params.push(("apikey", self.api_key.clone()));

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| UpstreamError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Request(e.to_string()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice::<Option<Value>>(&bytes)
            .map_err(|e| UpstreamError::Parse(e.to_string()))
    }
}
