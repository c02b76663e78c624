//! Core data models for noteful.
//!
//! Stored rows (`Folder`, `Note`), validated inserts (`NewFolder`, `NewNote`),
//! validated partial updates (`FolderUpdate`, `NoteUpdate`), and the raw
//! request bodies they are validated from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sanitize::sanitize_html;

// =============================================================================
// FOLDER TYPES
// =============================================================================

/// A folder row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Folder {
    pub id: i32,
    pub title: String,
}

impl Folder {
    /// Copy of this folder with markup in its text fields neutralized.
    pub fn sanitized(&self) -> Self {
        Self {
            id: self.id,
            title: sanitize_html(&self.title),
        }
    }
}

/// A validated folder ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFolder {
    pub title: String,
}

/// Validated folder changes. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderUpdate {
    pub title: Option<String>,
}

/// Body of `POST /api/folders`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateFolderRequest {
    pub title: Option<String>,
}

/// Body of `PATCH /api/folders/:id`. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFolderRequest {
    pub title: Option<String>,
}

// =============================================================================
// NOTE TYPES
// =============================================================================

/// A note row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub modified: DateTime<Utc>,
    pub folder_id: i32,
}

impl Note {
    /// Copy of this note with markup in `title` and `content` neutralized.
    pub fn sanitized(&self) -> Self {
        Self {
            id: self.id,
            title: sanitize_html(&self.title),
            content: sanitize_html(&self.content),
            modified: self.modified,
            folder_id: self.folder_id,
        }
    }
}

/// A validated note ready for insertion.
///
/// `modified` is `None` when the client did not supply one; the store then
/// stamps the current time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub folder_id: i32,
    pub modified: Option<DateTime<Utc>>,
}

/// Validated note changes. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub folder_id: Option<i32>,
}

/// Body of `POST /api/notes`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub folder_id: Option<i32>,
    pub modified: Option<DateTime<Utc>>,
}

/// Body of `PATCH /api/notes/:id`. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub folder_id: Option<i32>,
}
