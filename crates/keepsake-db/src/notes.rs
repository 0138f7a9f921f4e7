//! Note repository implementation.

use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use tracing::debug;
use uuid::Uuid;

use keepsake_core::{
    new_v7, Entity, EntityQuery, EntityRepository, Error, Note, NoteDraft, Result,
};

use crate::filter::{bind_params, EntityFilterSqlBuilder};

const NOTE_COLUMNS: &str = "id, title, content, tags, is_favorite, created_at, updated_at";

/// PostgreSQL implementation of `EntityRepository<Note>`.
#[derive(Clone)]
pub struct PgNoteRepository {
    pool: Pool<Postgres>,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn map_row_to_note(row: PgRow) -> Note {
    Note {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        tags: row.get("tags"),
        is_favorite: row.get("is_favorite"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl EntityRepository<Note> for PgNoteRepository {
    async fn insert(&self, draft: NoteDraft) -> Result<Note> {
        let note = Note::from_draft(new_v7(), draft, Utc::now())?;

        let row = sqlx::query(&format!(
            "INSERT INTO note (id, title, content, tags, is_favorite, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {NOTE_COLUMNS}"
        ))
        .bind(note.id)
        .bind(&note.title)
        .bind(&note.content)
        .bind(&note.tags)
        .bind(note.is_favorite)
        .bind(note.created_at)
        .bind(note.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(map_row_to_note(row))
    }

    async fn fetch(&self, id: Uuid) -> Result<Note> {
        sqlx::query(&format!("SELECT {NOTE_COLUMNS} FROM note WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?
            .map(map_row_to_note)
            .ok_or(Error::NotFound(Note::KIND, id))
    }

    async fn find(&self, query: &EntityQuery) -> Result<Vec<Note>> {
        let start = Instant::now();
        let (where_clause, params) = EntityFilterSqlBuilder::new(query, 0).build();
        let limit_param = params.len() + 1;
        let sql = format!(
            "SELECT {NOTE_COLUMNS} FROM note
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
            component = "notes",
            op = "find",
            result_count = rows.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Listed notes"
        );
        Ok(rows.into_iter().map(map_row_to_note).collect())
    }

    async fn replace(&self, id: Uuid, draft: NoteDraft) -> Result<Note> {
        sqlx::query(&format!(
            "UPDATE note SET
                title = $2,
                content = $3,
                tags = COALESCE($4::text[], tags),
                is_favorite = COALESCE($5, is_favorite),
                updated_at = $6
             WHERE id = $1
             RETURNING {NOTE_COLUMNS}"
        ))
        .bind(id)
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(&draft.tags)
        .bind(draft.is_favorite)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?
        .map(map_row_to_note)
        .ok_or(Error::NotFound(Note::KIND, id))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM note WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(Note::KIND, id));
        }
        Ok(())
    }
}
