//! # noteful-db
//!
//! Store gateway for noteful.
//!
//! This crate provides:
//! - Connection pool management
//! - PostgreSQL repositories for folders and notes
//! - An in-memory store implementing the same traits
//! - Shared fixtures for integration tests
//!
//! The schema lives in `migrations/` at the repository root and is applied
//! outside the process (`sqlx migrate run`).
//!
//! ## Example
//!
//! ```rust,ignore
//! use noteful_db::{Database, FolderRepository, NewFolder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/noteful").await?;
//!
//!     let folder = db.folders.insert(NewFolder {
//!         title: "Recipes".to_string(),
//!     }).await?;
//!
//!     println!("Created folder: {}", folder.id);
//!     Ok(())
//! }
//! ```
pub mod folders;
pub mod memory;
pub mod notes;
pub mod pool;

// Test fixtures for integration tests
// Note: Always compiled so integration tests in other crates can share them
pub mod test_fixtures;

// Re-export core types
pub use noteful_core::*;

pub use folders::PgFolderRepository;
pub use memory::MemoryStore;
pub use notes::PgNoteRepository;
pub use pool::{connect_pool, PoolConfig};

/// Combined database context with all repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Folder repository.
    pub folders: PgFolderRepository,
    /// Note repository.
    pub notes: PgNoteRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            folders: PgFolderRepository::new(pool.clone()),
            notes: PgNoteRepository::new(pool.clone()),
            pool,
        }
    }

    /// Connect with the default pool configuration.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_config(url, PoolConfig::default()).await
    }

    /// Connect with a custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = connect_pool(url, config).await?;
        Ok(Self::new(pool))
    }
}
