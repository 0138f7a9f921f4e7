//! Structured logging field name constants for keepsake.
//!
//! All crates use these names for structured `tracing` fields so logs can be
//! queried consistently across subsystems.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Unexpected failure reported to the client as a 500 |
//! | WARN  | Recoverable issue, automatic fallback applied (enrichment) |
//! | INFO  | Lifecycle events (startup, shutdown), entity writes |
//! | DEBUG | Query construction, store timings, config choices |
//! | TRACE | Per-item data (extracted metadata, matched rows) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated from the `x-request-id` header.
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "database", "enrich"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "pool", "notes", "bookmarks", "fetcher", "memory_store"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "insert", "find", "replace", "delete", "fetch_metadata"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Entity kind ("note" or "bookmark").
pub const ENTITY_KIND: &str = "kind";

/// Entity UUID being operated on.
pub const ENTITY_ID: &str = "entity_id";

/// Free-text search query.
pub const QUERY: &str = "query";

/// Number of tag filter values.
pub const TAG_COUNT: &str = "tag_count";

/// Target URL of an outbound metadata fetch.
pub const URL: &str = "url";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned by a query.
pub const RESULT_COUNT: &str = "result_count";

/// Number of active connections in the pool.
pub const POOL_SIZE: &str = "pool_size";

/// Number of idle connections in the pool.
pub const POOL_IDLE: &str = "pool_idle";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// HTTP status of an outbound response.
pub const STATUS: &str = "status";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
