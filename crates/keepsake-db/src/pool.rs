//! PostgreSQL connection pool.

use std::time::{Duration, Instant};

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info, warn};

use keepsake_core::Result;

/// Pool size when `DB_MAX_CONNECTIONS` is unset or unusable.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Environment variable holding the pool size.
pub const MAX_CONNECTIONS_ENV: &str = "DB_MAX_CONNECTIONS";

/// How long a request waits for a free connection.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Pool sizing for one keepsake process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    pub max_connections: u32,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl PoolConfig {
    /// A pool of at most `n` connections, never fewer than one.
    pub fn with_max_connections(n: u32) -> Self {
        Self {
            max_connections: n.max(1),
        }
    }

    /// Parse a raw `DB_MAX_CONNECTIONS` value. Missing, zero, or non-numeric
    /// values keep the default.
    pub fn from_max_connections(raw: Option<&str>) -> Self {
        raw.and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|n| *n > 0)
            .map(Self::with_max_connections)
            .unwrap_or_default()
    }
}

/// Open a pool against `database_url`.
pub async fn open_pool(database_url: &str, config: PoolConfig) -> Result<PgPool> {
    let start = Instant::now();

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await?;

    info!(
        subsystem = "database",
        component = "pool",
        op = "open",
        max_connections = config.max_connections,
        pool_size = pool.size(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Database connection pool established"
    );
    Ok(pool)
}

/// Log pool size and idle count; warns when every connection is checked out.
pub fn log_pool_metrics(pool: &PgPool) {
    let size = pool.size();
    let idle = pool.num_idle();

    debug!(
        subsystem = "database",
        component = "pool",
        op = "metrics",
        pool_size = size,
        pool_idle = idle,
        "Pool health check"
    );

    if idle == 0 && size > 0 {
        warn!(
            subsystem = "database",
            component = "pool",
            pool_size = size,
            "Connection pool has no idle connections"
        );
    }
}
