//! Folder repository implementation.

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use noteful_core::{Error, Folder, FolderRepository, FolderUpdate, NewFolder, Result};

/// PostgreSQL implementation of FolderRepository.
#[derive(Clone)]
pub struct PgFolderRepository {
    pool: Pool<Postgres>,
}

impl PgFolderRepository {
    /// Create a new PgFolderRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderRepository for PgFolderRepository {
    async fn list(&self) -> Result<Vec<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT id, title FROM noteful_folders ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn get(&self, id: i32) -> Result<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT id, title FROM noteful_folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn insert(&self, folder: NewFolder) -> Result<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO noteful_folders (title) VALUES ($1) RETURNING id, title",
        )
        .bind(folder.title)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)
    }

    async fn update(&self, id: i32, changes: FolderUpdate) -> Result<u64> {
        let result =
            sqlx::query("UPDATE noteful_folders SET title = COALESCE($1, title) WHERE id = $2")
                .bind(changes.title)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(Error::Database)?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i32) -> Result<u64> {
        // Notes in the folder go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM noteful_folders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(result.rows_affected())
    }
}
