//! In-memory store for tests and local runs.
//!
//! Mirrors the PostgreSQL schema's observable behavior: ids are assigned
//! from 1 in insertion order, rows list in id order, notes require an
//! existing folder, and deleting a folder deletes its notes.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use noteful_db::memory::MemoryStore;
//! use noteful_db::{FolderRepository, NewFolder};
//!
//! let store = MemoryStore::new();
//! let folder = store
//!     .folders()
//!     .insert(NewFolder { title: "Inbox".to_string() })
//!     .await?;
//! assert_eq!(folder.id, 1);
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use noteful_core::{
    Error, Folder, FolderRepository, FolderUpdate, NewFolder, NewNote, Note, NoteRepository,
    NoteUpdate, Result,
};

#[derive(Debug, Default)]
struct MemoryState {
    folders: BTreeMap<i32, Folder>,
    notes: BTreeMap<i32, Note>,
    last_folder_id: i32,
    last_note_id: i32,
}

/// Shared in-memory tables. Cloning shares the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folder repository over this store.
    pub fn folders(&self) -> MemoryFolderRepository {
        MemoryFolderRepository {
            store: self.clone(),
        }
    }

    /// Note repository over this store.
    pub fn notes(&self) -> MemoryNoteRepository {
        MemoryNoteRepository {
            store: self.clone(),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| Error::Internal("memory store lock poisoned".to_string()))
    }
}

/// In-memory implementation of FolderRepository.
#[derive(Debug, Clone)]
pub struct MemoryFolderRepository {
    store: MemoryStore,
}

#[async_trait]
impl FolderRepository for MemoryFolderRepository {
    async fn list(&self) -> Result<Vec<Folder>> {
        Ok(self.store.lock()?.folders.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> Result<Option<Folder>> {
        Ok(self.store.lock()?.folders.get(&id).cloned())
    }

    async fn insert(&self, folder: NewFolder) -> Result<Folder> {
        let mut state = self.store.lock()?;
        state.last_folder_id += 1;
        let row = Folder {
            id: state.last_folder_id,
            title: folder.title,
        };
        state.folders.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, changes: FolderUpdate) -> Result<u64> {
        let mut state = self.store.lock()?;
        let Some(row) = state.folders.get_mut(&id) else {
            return Ok(0);
        };
        if let Some(title) = changes.title {
            row.title = title;
        }
        Ok(1)
    }

    async fn delete(&self, id: i32) -> Result<u64> {
        let mut state = self.store.lock()?;
        if state.folders.remove(&id).is_none() {
            return Ok(0);
        }
        state.notes.retain(|_, note| note.folder_id != id);
        Ok(1)
    }
}

/// In-memory implementation of NoteRepository.
#[derive(Debug, Clone)]
pub struct MemoryNoteRepository {
    store: MemoryStore,
}

fn missing_folder(folder_id: i32) -> Error {
    Error::Internal(format!(
        "foreign key violation: folder {} does not exist",
        folder_id
    ))
}

#[async_trait]
impl NoteRepository for MemoryNoteRepository {
    async fn list(&self) -> Result<Vec<Note>> {
        Ok(self.store.lock()?.notes.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> Result<Option<Note>> {
        Ok(self.store.lock()?.notes.get(&id).cloned())
    }

    async fn insert(&self, note: NewNote) -> Result<Note> {
        let mut state = self.store.lock()?;
        if !state.folders.contains_key(&note.folder_id) {
            return Err(missing_folder(note.folder_id));
        }
        state.last_note_id += 1;
        let row = Note {
            id: state.last_note_id,
            title: note.title,
            content: note.content,
            modified: note.modified.unwrap_or_else(Utc::now),
            folder_id: note.folder_id,
        };
        state.notes.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, changes: NoteUpdate) -> Result<u64> {
        let mut state = self.store.lock()?;
        if let Some(folder_id) = changes.folder_id {
            if !state.folders.contains_key(&folder_id) {
                return Err(missing_folder(folder_id));
            }
        }
        let Some(row) = state.notes.get_mut(&id) else {
            return Ok(0);
        };
        if let Some(title) = changes.title {
            row.title = title;
        }
        if let Some(content) = changes.content {
            row.content = content;
        }
        if let Some(folder_id) = changes.folder_id {
            row.folder_id = folder_id;
        }
        Ok(1)
    }

    async fn delete(&self, id: i32) -> Result<u64> {
        Ok(self.store.lock()?.notes.remove(&id).map_or(0, |_| 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_note(folder_id: i32, title: &str) -> NewNote {
        NewNote {
            title: title.to_string(),
            content: "content".to_string(),
            folder_id,
            modified: None,
        }
    }

    #[tokio::test]
    async fn test_ids_assigned_in_order() {
        let store = MemoryStore::new();
        let folders = store.folders();
        for expected in 1..=3 {
            let folder = folders
                .insert(NewFolder {
                    title: format!("Folder {}", expected),
                })
                .await
                .unwrap();
            assert_eq!(folder.id, expected);
        }
        let ids: Vec<i32> = folders.list().await.unwrap().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let store = MemoryStore::new();
        let folders = store.folders();
        let first = folders
            .insert(NewFolder {
                title: "one".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(folders.delete(first.id).await.unwrap(), 1);
        let second = folders
            .insert(NewFolder {
                title: "two".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_update_and_delete_report_rows_affected() {
        let store = MemoryStore::new();
        let folders = store.folders();
        assert_eq!(folders.update(9, FolderUpdate::default()).await.unwrap(), 0);
        assert_eq!(folders.delete(9).await.unwrap(), 0);
        assert_eq!(store.notes().delete(9).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_note_requires_existing_folder() {
        let store = MemoryStore::new();
        let err = store.notes().insert(new_note(5, "orphan")).await.unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
    }

    #[tokio::test]
    async fn test_note_modified_defaults_to_now() {
        let store = MemoryStore::new();
        let folder = store
            .folders()
            .insert(NewFolder {
                title: "Inbox".to_string(),
            })
            .await
            .unwrap();
        let before = Utc::now();
        let note = store.notes().insert(new_note(folder.id, "first")).await.unwrap();
        assert!(note.modified >= before);
    }

    #[tokio::test]
    async fn test_partial_note_update() {
        let store = MemoryStore::new();
        let folder = store
            .folders()
            .insert(NewFolder {
                title: "Inbox".to_string(),
            })
            .await
            .unwrap();
        let notes = store.notes();
        let note = notes.insert(new_note(folder.id, "first")).await.unwrap();

        let changes = NoteUpdate {
            title: Some("renamed".to_string()),
            ..Default::default()
        };
        assert_eq!(notes.update(note.id, changes).await.unwrap(), 1);

        let stored = notes.get(note.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "renamed");
        assert_eq!(stored.content, note.content);
        assert_eq!(stored.folder_id, note.folder_id);
        assert_eq!(stored.modified, note.modified);
    }

    #[tokio::test]
    async fn test_folder_delete_cascades_to_notes() {
        let store = MemoryStore::new();
        let folders = store.folders();
        let notes = store.notes();
        let keep = folders
            .insert(NewFolder {
                title: "keep".to_string(),
            })
            .await
            .unwrap();
        let doomed = folders
            .insert(NewFolder {
                title: "drop".to_string(),
            })
            .await
            .unwrap();
        notes.insert(new_note(keep.id, "stays")).await.unwrap();
        notes.insert(new_note(doomed.id, "goes")).await.unwrap();

        folders.delete(doomed.id).await.unwrap();

        let remaining = notes.list().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "stays");
    }
}
