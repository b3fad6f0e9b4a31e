//! NeoWs Client: HTTP client for the NASA browse endpoint

use std::time::Duration;

use async_trait::async_trait;

use super::parse::summarize_browse_page;
use super::NeoFeed;
use crate::config::NasaConfig;
use crate::types::{BrowseQuery, NeoSummary};

/// NEO client errors
#[derive(Debug, thiserror::Error)]
pub enum NeoClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("NASA returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("Failed to decode NEO payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("NASA API key not configured")]
    MissingApiKey,
}

/// HTTP client for NeoWs
#[derive(Clone)]
pub struct NeoClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl NeoClient {
    /// Create a new client.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, NeoClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Build from config; fails without an API key.
    pub fn from_config(config: &NasaConfig) -> Result<Self, NeoClientError> {
        let key = config.api_key().ok_or(NeoClientError::MissingApiKey)?;
        Self::new(&config.base_url, key, Duration::from_secs(config.timeout_secs))
    }

    /// Get base URL for logging
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn browse_url(&self) -> String {
        format!("{}/neo/browse", self.base_url)
    }
}

#[async_trait]
impl NeoFeed for NeoClient {
    async fn browse(&self, query: &BrowseQuery) -> Result<Vec<NeoSummary>, NeoClientError> {
        let mut params = vec![("api_key", self.api_key.clone())];
        if let Some(page) = query.page {
            params.push(("page", page.to_string()));
        }
        if let Some(size) = query.size {
            params.push(("size", size.to_string()));
        }

        let resp = self.http.get(self.browse_url()).query(&params).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(NeoClientError::Status(status));
        }

        let body = resp.bytes().await?;
        let neos = summarize_browse_page(&body)?;

        tracing::debug!(count = neos.len(), page = ?query.page, "Fetched NEO browse page");
        Ok(neos)
    }
}
