//! Image search providers.
//!
//! The [`ImageSource`] trait is the seam between the pipeline and the
//! network: it lists candidate image URLs for a caption and fetches the
//! bytes behind each URL. The production implementation is
//! [`HttpImageSource`], a blocking `reqwest` client speaking the JSON shape
//! of the classic AJAX image-search API:
//!
//! ```json
//! {"responseData": {"results": [{"url": "http://..."}, ...]}}
//! ```
//!
//! That endpoint is long gone, so the URL and query parameters come from
//! config and any service answering with the same shape will do. Tests plug
//! in an in-memory source instead.

use crate::config::SearchConfig;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("malformed search response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A provider of candidate images for a caption.
pub trait ImageSource {
    /// Ranked candidate image URLs for `query`.
    ///
    /// Any failure of the search itself yields an empty list; the
    /// implementation reports it.
    fn candidate_urls(&self, query: &str) -> Vec<String>;

    /// Download the bytes behind one candidate URL.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, SearchError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    response_data: Option<ResponseData>,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    url: String,
}

/// Extract result URLs, in ranked order, from a search response body.
///
/// A `null` `responseData` (the API's way of reporting errors) yields no
/// results.
pub fn parse_search_response(body: &str) -> Result<Vec<String>, SearchError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response
        .response_data
        .map(|data| data.results.into_iter().map(|r| r.url).collect())
        .unwrap_or_default())
}

/// Image search over HTTP.
#[derive(Debug, Clone)]
pub struct HttpImageSource {
    client: Client,
    endpoint: String,
    params: Vec<(String, String)>,
}

impl HttpImageSource {
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            params: config
                .params
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        })
    }

    fn search(&self, query: &str) -> Result<Vec<String>, SearchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&self.params)
            .query(&[("q", query)])
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                url: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }
        parse_search_response(&response.text()?)
    }
}

impl ImageSource for HttpImageSource {
    fn candidate_urls(&self, query: &str) -> Vec<String> {
        match self.search(query) {
            Ok(urls) => {
                tracing::debug!(query, count = urls.len(), "image search finished");
                urls
            }
            Err(e) => {
                tracing::warn!(query, error = %e, "image search failed");
                Vec::new()
            }
        }
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>, SearchError> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.bytes()?.to_vec())
    }
}
