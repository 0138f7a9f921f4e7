//! Bookmark repository implementation.

use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgRow, types::Json, Pool, Postgres, Row};
use tracing::debug;
use uuid::Uuid;

use keepsake_core::{
    new_v7, Bookmark, BookmarkDraft, BookmarkMetadata, Entity, EntityQuery, EntityRepository,
    Error, Result,
};

use crate::filter::{bind_params, EntityFilterSqlBuilder};

const BOOKMARK_COLUMNS: &str =
    "id, title, url, description, tags, is_favorite, metadata, created_at, updated_at";

/// PostgreSQL implementation of `EntityRepository<Bookmark>`.
#[derive(Clone)]
pub struct PgBookmarkRepository {
    pool: Pool<Postgres>,
}

impl PgBookmarkRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn map_row_to_bookmark(row: PgRow) -> Bookmark {
    Bookmark {
        id: row.get("id"),
        title: row.get("title"),
        url: row.get("url"),
        description: row.get("description"),
        tags: row.get("tags"),
        is_favorite: row.get("is_favorite"),
        metadata: row
            .get::<Option<Json<BookmarkMetadata>>, _>("metadata")
            .map(|m| m.0),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl EntityRepository<Bookmark> for PgBookmarkRepository {
    async fn insert(&self, draft: BookmarkDraft) -> Result<Bookmark> {
        let bookmark = Bookmark::from_draft(new_v7(), draft, Utc::now())?;

        let row = sqlx::query(&format!(
            "INSERT INTO bookmark
                (id, title, url, description, tags, is_favorite, metadata, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {BOOKMARK_COLUMNS}"
        ))
        .bind(bookmark.id)
        .bind(&bookmark.title)
        .bind(&bookmark.url)
        .bind(&bookmark.description)
        .bind(&bookmark.tags)
        .bind(bookmark.is_favorite)
        .bind(bookmark.metadata.as_ref().map(Json))
        .bind(bookmark.created_at)
        .bind(bookmark.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(map_row_to_bookmark(row))
    }

    async fn fetch(&self, id: Uuid) -> Result<Bookmark> {
        sqlx::query(&format!(
            "SELECT {BOOKMARK_COLUMNS} FROM bookmark WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?
        .map(map_row_to_bookmark)
        .ok_or(Error::NotFound(Bookmark::KIND, id))
    }

    async fn find(&self, query: &EntityQuery) -> Result<Vec<Bookmark>> {
        let start = Instant::now();
        let (where_clause, params) = EntityFilterSqlBuilder::new(query, 0).build();
        let limit_param = params.len() + 1;
        let sql = format!(
            "SELECT {BOOKMARK_COLUMNS} FROM bookmark
             WHERE {where_clause}
             ORDER BY created_at DESC, id DESC
             LIMIT ${limit_param}"
        );

        let rows = bind_params(sqlx::query(&sql), &params)
            .bind(query.limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "bookmarks",
            op = "find",
            result_count = rows.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Listed bookmarks"
        );
        Ok(rows.into_iter().map(map_row_to_bookmark).collect())
    }

    async fn replace(&self, id: Uuid, draft: BookmarkDraft) -> Result<Bookmark> {
        // metadata is set on insert only
        sqlx::query(&format!(
            "UPDATE bookmark SET
                title = COALESCE($2, title),
                url = $3,
                description = COALESCE($4, description),
                tags = COALESCE($5::text[], tags),
                is_favorite = COALESCE($6, is_favorite),
                updated_at = $7
             WHERE id = $1
             RETURNING {BOOKMARK_COLUMNS}"
        ))
        .bind(id)
        .bind(draft.title.filter(|t| !t.is_empty()))
        .bind(&draft.url)
        .bind(&draft.description)
        .bind(&draft.tags)
        .bind(draft.is_favorite)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?
        .map(map_row_to_bookmark)
        .ok_or(Error::NotFound(Bookmark::KIND, id))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM bookmark WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(Bookmark::KIND, id));
        }
        Ok(())
    }
}
