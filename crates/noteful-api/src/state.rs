//! Application state shared across handlers.

use std::sync::Arc;

use noteful_db::{Database, FolderRepository, MemoryStore, NoteRepository};

/// Store gateways and the bearer credential, built once at startup and
/// cloned into every request.
#[derive(Clone)]
pub struct AppState {
    pub folders: Arc<dyn FolderRepository>,
    pub notes: Arc<dyn NoteRepository>,
    /// Credential the Auth Gate compares bearer tokens against.
    pub api_token: Arc<str>,
}

impl AppState {
    pub fn new(
        folders: Arc<dyn FolderRepository>,
        notes: Arc<dyn NoteRepository>,
        api_token: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            folders,
            notes,
            api_token: api_token.into(),
        }
    }

    /// State backed by PostgreSQL.
    pub fn from_database(db: Database, api_token: impl Into<Arc<str>>) -> Self {
        Self::new(Arc::new(db.folders), Arc::new(db.notes), api_token)
    }

    /// State backed by an in-memory store.
    pub fn in_memory(store: &MemoryStore, api_token: impl Into<Arc<str>>) -> Self {
        Self::new(
            Arc::new(store.folders()),
            Arc::new(store.notes()),
            api_token,
        )
    }
}
