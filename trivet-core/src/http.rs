//! HTTP client trait and implementations.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::FetchError;

/// Trait for HTTP clients, enabling mockability in tests.
///
/// Timeout and user agent travel with each call: every source origin
/// carries its own bounds, and one shared client serves them all.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GET a URL and return the response body as text.
    async fn fetch_text(
        &self,
        url: &str,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<String, FetchError>;
}

/// Production HTTP client. One shared reqwest client for connection pooling.
pub struct WebClient {
    inner: reqwest::Client,
}

impl WebClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self {
            inner: reqwest::Client::builder().build()?,
        })
    }
}

#[async_trait]
impl HttpClient for WebClient {
    async fn fetch_text(
        &self,
        url: &str,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<String, FetchError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        tracing::debug!(url, timeout_secs = timeout.as_secs(), "network: fetching");
        let response = self
            .inner
            .get(parsed)
            .timeout(timeout)
            .header(reqwest::header::USER_AGENT, user_agent)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!(url, status = %response.status(), "network: request failed");
            return Err(FetchError::RequestFailed(
                response.error_for_status().unwrap_err(),
            ));
        }

        Ok(response.text().await?)
    }
}

/// Mock response for testing.
#[derive(Clone)]
pub enum MockResponse {
    Text(String),
    Error(String),
}

/// Mock HTTP client for testing, keyed by exact URL.
#[derive(Default)]
pub struct MockClient {
    responses: HashMap<String, MockResponse>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text response for a URL.
    pub fn with_text(mut self, url: &str, body: &str) -> Self {
        self.responses
            .insert(url.to_string(), MockResponse::Text(body.to_string()));
        self
    }

    /// Add an error response for a URL.
    pub fn with_error(mut self, url: &str, error: &str) -> Self {
        self.responses
            .insert(url.to_string(), MockResponse::Error(error.to_string()));
        self
    }
}

#[async_trait]
impl HttpClient for MockClient {
    async fn fetch_text(
        &self,
        url: &str,
        _timeout: Duration,
        _user_agent: &str,
    ) -> Result<String, FetchError> {
        match self.responses.get(url) {
            Some(MockResponse::Text(body)) => Ok(body.clone()),
            Some(MockResponse::Error(e)) => Err(FetchError::InvalidUrl(e.clone())),
            None => Err(FetchError::InvalidUrl(format!(
                "No mock response for URL: {}",
                url
            ))),
        }
    }
}
