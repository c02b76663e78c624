//! Note repository implementation.

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use noteful_core::{Error, NewNote, Note, NoteRepository, NoteUpdate, Result};

const NOTE_COLUMNS: &str = "id, title, content, modified, folder_id";

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

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn list(&self) -> Result<Vec<Note>> {
        let sql = format!("SELECT {} FROM noteful_notes ORDER BY id", NOTE_COLUMNS);
        sqlx::query_as::<_, Note>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn get(&self, id: i32) -> Result<Option<Note>> {
        let sql = format!("SELECT {} FROM noteful_notes WHERE id = $1", NOTE_COLUMNS);
        sqlx::query_as::<_, Note>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn insert(&self, note: NewNote) -> Result<Note> {
        // A client-supplied timestamp wins; otherwise the server stamps it.
        let sql = format!(
            "INSERT INTO noteful_notes (title, content, folder_id, modified)
             VALUES ($1, $2, $3, COALESCE($4, now()))
             RETURNING {}",
            NOTE_COLUMNS
        );
        sqlx::query_as::<_, Note>(&sql)
            .bind(note.title)
            .bind(note.content)
            .bind(note.folder_id)
            .bind(note.modified)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn update(&self, id: i32, changes: NoteUpdate) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE noteful_notes
            SET title = COALESCE($1, title),
                content = COALESCE($2, content),
                folder_id = COALESCE($3, folder_id)
            WHERE id = $4
            "#,
        )
        .bind(changes.title)
        .bind(changes.content)
        .bind(changes.folder_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i32) -> Result<u64> {
        let result = sqlx::query("DELETE FROM noteful_notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(result.rows_affected())
    }
}
