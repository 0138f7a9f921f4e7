//! # keepsake-enrich
//!
//! Best-effort page metadata for bookmarks created without a title.
//!
//! [`HttpMetadataFetcher`] normalizes the URL, issues one GET with a short
//! timeout, and runs a [`MetadataExtractor`] over the body. Any failure is
//! logged and reported as "no metadata"; callers fall back to the URL.

pub mod config;
pub mod extract;
pub mod fetcher;
pub mod mock;
pub mod url;

pub use config::EnrichConfig;
pub use extract::{MetadataExtractor, PatternExtractor};
pub use fetcher::{FetchError, HttpMetadataFetcher};
pub use mock::MockMetadataFetcher;
pub use url::normalize_url;
