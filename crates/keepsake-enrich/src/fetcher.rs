//! HTTP page fetcher.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use keepsake_core::{Error, MetadataFetcher, PageMetadata, Result};

use crate::config::EnrichConfig;
use crate::extract::{MetadataExtractor, PatternExtractor};
use crate::url::normalize_url;

/// Why a page fetch produced no metadata.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, timeout, redirect, or body-read failure.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("unexpected status {0}")]
    Status(u16),
}

/// Fetches a page with one GET request and extracts its metadata.
///
/// Failures are logged at WARN and reported as `None`. There is no retry.
#[derive(Clone)]
pub struct HttpMetadataFetcher {
    client: Client,
    extractor: Arc<dyn MetadataExtractor>,
}

impl HttpMetadataFetcher {
    /// Create a fetcher using [`PatternExtractor`].
    pub fn new(config: EnrichConfig) -> Result<Self> {
        Self::with_extractor(config, Arc::new(PatternExtractor))
    }

    /// Create a fetcher with a custom extractor.
    pub fn with_extractor(
        config: EnrichConfig,
        extractor: Arc<dyn MetadataExtractor>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, extractor })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(EnrichConfig::from_env())
    }

    /// Fetch the page body, failing on any transport error or non-2xx status.
    pub async fn fetch_page(&self, url: &str) -> std::result::Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl MetadataFetcher for HttpMetadataFetcher {
    async fn fetch_metadata(&self, url: &str) -> Option<PageMetadata> {
        let target = normalize_url(url);
        let start = Instant::now();

        match self.fetch_page(&target).await {
            Ok(body) => {
                let page = self.extractor.extract(&body);
                debug!(
                    subsystem = "enrich",
                    component = "fetcher",
                    op = "fetch",
                    url = %target,
                    has_title = page.title.is_some(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Fetched page metadata"
                );
                Some(page)
            }
            Err(e) => {
                warn!(
                    subsystem = "enrich",
                    component = "fetcher",
                    op = "fetch",
                    url = %target,
                    error = %e,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Failed to fetch URL metadata"
                );
                None
            }
        }
    }
}
