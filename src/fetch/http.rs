//! Fetch collaborator trait and the reqwest-backed implementation.

use crate::Result;
use async_trait::async_trait;
use bytes::Bytes;
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Errors from the fetch collaborator.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status: HTTP {0}")]
    Status(u16),

    #[error("fetch error: {0}")]
    Other(String),
}

/// Resolves an opaque input (e.g. a URL) to a payload.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, input: &str) -> Result<Bytes>;
}

/// HTTP GET fetcher.
///
/// The request timeout is env-overridable via `CACHETRACE_HTTP_TIMEOUT_SECS`
/// (default 30).
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let timeout_secs = env::var("CACHETRACE_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| FetchError::Other(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, input: &str) -> Result<Bytes> {
        let response = self
            .client
            .get(input)
            .send()
            .await
            .map_err(FetchError::Http)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()).into());
        }
        let body = response.bytes().await.map_err(FetchError::Http)?;
        Ok(body)
    }
}
