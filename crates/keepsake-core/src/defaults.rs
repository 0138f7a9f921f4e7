//! Centralized default constants for keepsake.
//!
//! All crates reference these constants instead of defining their own magic
//! numbers. Organized by domain area.

// =============================================================================
// QUERY
// =============================================================================

/// Maximum number of entities returned by a list query. There is no offset.
pub const RESULT_CAP: usize = 50;

/// The only `favorite` query value that restricts results to favorites.
pub const FAVORITE_FILTER_VALUE: &str = "true";

// =============================================================================
// FIELD LIMITS
// =============================================================================

/// Maximum characters in an entity title.
pub const TITLE_MAX_LEN: usize = 200;

/// Maximum characters in note content.
pub const CONTENT_MAX_LEN: usize = 5000;

/// Maximum characters in a bookmark description.
pub const DESCRIPTION_MAX_LEN: usize = 500;

/// Maximum characters in a single tag.
pub const TAG_MAX_LEN: usize = 50;

// =============================================================================
// ENRICHMENT
// =============================================================================

/// Timeout for the bookmark metadata fetch (seconds).
pub const FETCH_TIMEOUT_SECS: u64 = 5;

/// User-Agent sent with the bookmark metadata fetch.
pub const FETCH_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Scheme prefixed to bookmark URLs that do not start with `http`.
pub const DEFAULT_URL_SCHEME: &str = "https://";

// =============================================================================
// SERVER
// =============================================================================

/// Default listen host.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default listen port.
pub const SERVER_PORT: u16 = 5000;

/// Default PostgreSQL connection URL.
pub const DATABASE_URL: &str = "postgres://localhost/keepsake";

/// Default CORS origin (the web client dev server).
pub const ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Maximum accepted request body size in bytes.
pub const REQUEST_BODY_LIMIT: usize = 1024 * 1024;
