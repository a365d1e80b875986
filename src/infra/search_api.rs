//! Thin asynchronous client for the deal aggregation service.
//!
//! - One `POST` per search, JSON in and out.
//! - Any non-success status, network failure or undecodable body is an error;
//!   callers decide what the user sees.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tracing::debug;

use crate::config::AppConfig;
use crate::domain::{SearchRequest, SearchResponse};
use crate::util::version::user_agent;

#[derive(Debug, Error)]
pub enum SearchClientError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service answered with status {0}")]
    Status(StatusCode),
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Clone, Debug)]
pub struct SearchClient {
    http: Client,
    endpoint: Url,
}

impl SearchClient {
    pub fn from_config(config: &AppConfig) -> Result<Self, SearchClientError> {
        Self::with_endpoint(&config.api_url, config.request_timeout)
    }

    pub fn with_endpoint(endpoint: &str, timeout: Duration) -> Result<Self, SearchClientError> {
        let endpoint = Url::parse(endpoint)?;
        let http = Client::builder()
            .user_agent(user_agent())
            .timeout(timeout)
            .build()?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<SearchResponse, SearchClientError> {
        debug!(endpoint = %self.endpoint, query = %request.query, "posting search request");

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchClientError::Status(status));
        }

        let body = response.bytes().await?;
        debug!(status = %status, bytes = body.len(), "search response received");
        Ok(serde_json::from_slice(&body)?)
    }
}
