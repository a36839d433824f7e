//! Blocking `_search` executor.

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::error::Result;
use crate::search::request::SearchRequest;

/// Thin wrapper over a blocking HTTP client pointed at one host.
pub struct EsClient {
    http: Client,
    host: String,
}

impl EsClient {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            host: host.into(),
        }
    }

    /// POSTs the request body against the given index pattern and returns
    /// the raw response text. Blocks the calling thread; no retries, no
    /// timeout beyond the transport default. A non-success status is a
    /// transport failure.
    pub fn search(&self, indices: &str, request: &SearchRequest) -> Result<String> {
        let url = format!("https://{}/{}/_search", self.host, indices);
        debug!(%url, "issuing search");
        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(request.to_body()?)
            .send()?
            .error_for_status()?;
        let body = response.text()?;
        debug!(bytes = body.len(), "search response received");
        Ok(body)
    }
}
