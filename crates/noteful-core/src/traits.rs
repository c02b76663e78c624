//! Store gateway traits.
//!
//! One repository per resource type. Handlers only see these traits, so the
//! PostgreSQL implementation and the in-memory one are interchangeable.

use async_trait::async_trait;

use crate::{Folder, FolderUpdate, NewFolder, NewNote, Note, NoteUpdate, Result};

// =============================================================================
// FOLDER REPOSITORY
// =============================================================================

/// Repository for folder CRUD operations.
#[async_trait]
pub trait FolderRepository: Send + Sync {
    /// List all folders ordered by id.
    async fn list(&self) -> Result<Vec<Folder>>;

    /// Get a folder by ID.
    async fn get(&self, id: i32) -> Result<Option<Folder>>;

    /// Insert a folder and return the stored row.
    async fn insert(&self, folder: NewFolder) -> Result<Folder>;

    /// Apply the supplied changes. Returns the number of rows affected.
    async fn update(&self, id: i32, changes: FolderUpdate) -> Result<u64>;

    /// Delete a folder (the store cascades to its notes). Returns the number
    /// of rows affected.
    async fn delete(&self, id: i32) -> Result<u64>;
}

// =============================================================================
// NOTE REPOSITORY
// =============================================================================

/// Repository for note CRUD operations.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// List all notes ordered by id.
    async fn list(&self) -> Result<Vec<Note>>;

    /// Get a note by ID.
    async fn get(&self, id: i32) -> Result<Option<Note>>;

    /// Insert a note and return the stored row.
    async fn insert(&self, note: NewNote) -> Result<Note>;

    /// Apply the supplied changes. Returns the number of rows affected.
    async fn update(&self, id: i32, changes: NoteUpdate) -> Result<u64>;

    /// Delete a note. Returns the number of rows affected.
    async fn delete(&self, id: i32) -> Result<u64>;
}
