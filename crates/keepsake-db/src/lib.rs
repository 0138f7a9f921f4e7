//! # keepsake-db
//!
//! Storage layer for keepsake.
//!
//! This crate provides:
//! - Connection pool management
//! - PostgreSQL repositories for notes and bookmarks
//! - Full-text search with PostgreSQL tsvector
//! - An in-memory repository for tests and database-less runs
//!
//! ## Example
//!
//! ```rust,ignore
//! use keepsake_db::{Database, EntityRepository, NoteDraft, PoolConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/keepsake", PoolConfig::default()).await?;
//!     db.migrate().await?;
//!
//!     let note = db.notes.insert(NoteDraft {
//!         title: "Hello".to_string(),
//!         content: "world".to_string(),
//!         tags: Some(vec!["greeting".to_string()]),
//!         is_favorite: None,
//!     }).await?;
//!
//!     println!("Created note: {}", note.id);
//!     db.close().await;
//!     Ok(())
//! }
//! ```
pub mod bookmarks;
pub mod filter;
pub mod memory;
pub mod notes;
pub mod pool;

// Test fixtures for integration tests
// Always compiled so integration tests (in tests/) can use DEFAULT_TEST_DATABASE_URL
pub mod test_fixtures;

// Re-export core types
pub use keepsake_core::*;

pub use bookmarks::PgBookmarkRepository;
pub use filter::{EntityFilterSqlBuilder, QueryParam};
pub use memory::MemoryRepository;
pub use notes::PgNoteRepository;
pub use pool::{log_pool_metrics, open_pool, PoolConfig};

use tracing::info;

/// Combined database context with all repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Note repository.
    pub notes: PgNoteRepository,
    /// Bookmark repository.
    pub bookmarks: PgBookmarkRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            notes: PgNoteRepository::new(pool.clone()),
            bookmarks: PgBookmarkRepository::new(pool.clone()),
            pool,
        }
    }

    /// Connect to the given URL with the given pool sizing.
    pub async fn connect(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = open_pool(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        info!(
            subsystem = "database",
            component = "migrations",
            op = "run",
            "Database migrations applied"
        );
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }

    /// Close every pooled connection. Waits for checked-out connections to
    /// be returned.
    pub async fn close(&self) {
        log_pool_metrics(&self.pool);
        self.pool.close().await;
        info!(
            subsystem = "database",
            component = "pool",
            op = "close",
            "Database connection pool closed"
        );
    }
}
