//! Note repository implementation.

use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, Row};
use tracing::{debug, info};
use uuid::Uuid;

use quicknote_core::{new_v7, Error, Note, NoteRepository, Result};

/// PostgreSQL implementation of NoteRepository.
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

/// Map a database row to a Note.
fn map_row_to_note(row: &sqlx::postgres::PgRow) -> Result<Note> {
    Ok(Note {
        id: row.try_get("id").map_err(Error::Database)?,
        text: row.try_get("text").map_err(Error::Database)?,
        created_at: row.try_get("created_at_utc").map_err(Error::Database)?,
    })
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn insert(&self, text: &str) -> Result<Note> {
        let start = Instant::now();
        let row = sqlx::query(
            "INSERT INTO note (id, text, created_at_utc) VALUES ($1, $2, $3)
             RETURNING id, text, created_at_utc",
        )
        .bind(new_v7())
        .bind(text)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        let note = map_row_to_note(&row)?;
        info!(
            subsystem = "db",
            component = "notes",
            op = "insert",
            note_id = %note.id,
            duration_ms = start.elapsed().as_millis() as u64,
            "Note inserted"
        );
        Ok(note)
    }

    async fn list(&self) -> Result<Vec<Note>> {
        let start = Instant::now();
        let rows = sqlx::query(
            "SELECT id, text, created_at_utc FROM note ORDER BY created_at_utc ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        let notes = rows
            .iter()
            .map(map_row_to_note)
            .collect::<Result<Vec<_>>>()?;
        debug!(
            subsystem = "db",
            component = "notes",
            op = "list",
            result_count = notes.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Notes listed"
        );
        Ok(notes)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM note WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        let deleted = result.rows_affected() > 0;
        info!(
            subsystem = "db",
            component = "notes",
            op = "delete",
            note_id = %id,
            deleted,
            "Note delete applied"
        );
        Ok(deleted)
    }

    async fn exists(&self, id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM note WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(exists)
    }
}
