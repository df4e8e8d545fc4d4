use std::fmt;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::types::SearchResponse;

/// Errors that can occur while fetching search results.
///
/// The stories reducer does not distinguish between these; the variants
/// exist so the log says what actually went wrong.
#[derive(Debug)]
pub enum FetchError {
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// The API answered with a non-success status.
    Api { status: u16, message: String },
    /// The body was not the JSON we expected.
    Parse(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "network error: {msg}"),
            FetchError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            FetchError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Returns the name of the client, for logging.
    fn name(&self) -> &str;

    /// Performs one GET against a fully built query URL.
    async fn search(&self, url: &str) -> Result<SearchResponse, FetchError>;
}

/// Client for the Algolia-backed Hacker News search API. No auth.
pub struct AlgoliaClient {
    client: reqwest::Client,
}

impl AlgoliaClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for AlgoliaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchClient for AlgoliaClient {
    fn name(&self) -> &str {
        "algolia"
    }

    async fn search(&self, url: &str) -> Result<SearchResponse, FetchError> {
        info!("Search request: GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        debug!("Search response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Search API error: {} - {}", status, err_body);
            return Err(FetchError::Api {
                status,
                message: err_body,
            });
        }

        let body: SearchResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                FetchError::Parse(e.to_string())
            } else {
                FetchError::Network(e.to_string())
            }
        })?;

        info!(
            "Search complete: {} hits (nbHits={:?})",
            body.hits.len(),
            body.nb_hits
        );
        Ok(body)
    }
}
