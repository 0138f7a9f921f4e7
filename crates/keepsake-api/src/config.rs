//! Server configuration from environment variables.

use axum::http::HeaderValue;
use tracing::warn;

use keepsake_core::defaults::{
    ALLOWED_ORIGIN, DATABASE_URL, REQUEST_BODY_LIMIT, SERVER_HOST, SERVER_PORT,
};
use keepsake_core::{Error, Result};
use keepsake_db::pool::MAX_CONNECTIONS_ENV;
use keepsake_db::PoolConfig;

/// Which repository implementation backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    #[default]
    Postgres,
    Memory,
}

impl StoreKind {
    /// Parse a `KEEPSAKE_STORE` value.
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            other => Err(Error::Config(format!(
                "KEEPSAKE_STORE must be 'postgres' or 'memory', got '{}'",
                other
            ))),
        }
    }
}

/// Listener, store, and CORS settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub store: StoreKind,
    /// PostgreSQL pool sizing; unused by the memory store.
    pub pool: PoolConfig,
    pub allowed_origins: Vec<HeaderValue>,
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: SERVER_HOST.to_string(),
            port: SERVER_PORT,
            database_url: DATABASE_URL.to_string(),
            store: StoreKind::default(),
            pool: PoolConfig::default(),
            allowed_origins: vec![HeaderValue::from_static(ALLOWED_ORIGIN)],
            body_limit: REQUEST_BODY_LIMIT,
        }
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `DATABASE_URL`, `KEEPSAKE_STORE`,
    /// `DB_MAX_CONNECTIONS` and `ALLOWED_ORIGINS`. Only an unknown store kind is an error; other bad
    /// values fall back to defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let store = match std::env::var("KEEPSAKE_STORE") {
            Ok(value) if !value.trim().is_empty() => StoreKind::parse(&value)?,
            _ => defaults.store,
        };

        Ok(Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            store,
            pool: PoolConfig::from_max_connections(
                std::env::var(MAX_CONNECTIONS_ENV).ok().as_deref(),
            ),
            allowed_origins: parse_allowed_origins(
                &std::env::var("ALLOWED_ORIGINS").unwrap_or_default(),
            ),
            body_limit: defaults.body_limit,
        })
    }

    /// `host:port` for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse a comma-separated CORS origin whitelist.
///
/// Blank input yields the default origin. Entries that are not valid header
/// values are skipped with a warning.
pub fn parse_allowed_origins(raw: &str) -> Vec<HeaderValue> {
    if raw.trim().is_empty() {
        return vec![HeaderValue::from_static(ALLOWED_ORIGIN)];
    }

    raw.split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}
