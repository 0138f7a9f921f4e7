//! Mock metadata fetcher for deterministic testing.
//!
//! ## Usage
//!
//! ```rust
//! use keepsake_core::{MetadataFetcher, PageMetadata};
//! use keepsake_enrich::mock::MockMetadataFetcher;
//!
//! let fetcher = MockMetadataFetcher::new().with_page(
//!     "https://example.com",
//!     PageMetadata { title: Some("Example".into()), description: None },
//! );
//! assert!(fetcher.calls().is_empty());
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use keepsake_core::{MetadataFetcher, PageMetadata};

use crate::url::normalize_url;

/// Metadata fetcher that answers from a fixed table and records every call.
///
/// Lookups use the normalized URL, so `example.com` and
/// `https://example.com` hit the same entry. Unknown URLs behave like a
/// failed fetch.
#[derive(Clone, Default)]
pub struct MockMetadataFetcher {
    pages: Arc<HashMap<String, PageMetadata>>,
    call_log: Arc<Mutex<Vec<String>>>,
}

impl MockMetadataFetcher {
    /// Create a mock that fails every fetch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `page` for `url`.
    pub fn with_page(mut self, url: &str, page: PageMetadata) -> Self {
        Arc::make_mut(&mut self.pages).insert(normalize_url(url), page);
        self
    }

    /// Serve a page with only a title.
    pub fn with_title(self, url: &str, title: impl Into<String>) -> Self {
        self.with_page(
            url,
            PageMetadata {
                title: Some(title.into()),
                description: None,
            },
        )
    }

    /// URLs fetched so far, as passed by the caller.
    pub fn calls(&self) -> Vec<String> {
        self.call_log.lock().unwrap().clone()
    }

    /// Number of fetches so far.
    pub fn call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }
}

#[async_trait]
impl MetadataFetcher for MockMetadataFetcher {
    async fn fetch_metadata(&self, url: &str) -> Option<PageMetadata> {
        self.call_log.lock().unwrap().push(url.to_string());
        self.pages.get(&normalize_url(url)).cloned()
    }
}
