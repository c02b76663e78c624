//! Request body validation.
//!
//! Rules are checked field by field in declaration order and the first
//! failure is returned. Errors are never aggregated, so a given body always
//! produces the same message.

use thiserror::Error;

use crate::models::{
    CreateFolderRequest, CreateNoteRequest, FolderUpdate, NewFolder, NewNote, NoteUpdate,
    UpdateFolderRequest, UpdateNoteRequest,
};

/// Minimum folder title length, in characters.
pub const FOLDER_TITLE_MIN: usize = 3;

/// Maximum folder title length, in characters.
pub const FOLDER_TITLE_MAX: usize = 100;

/// Minimum note title length, in characters.
pub const NOTE_TITLE_MIN: usize = 3;

/// Fields a folder body may carry, in declaration order.
pub const FOLDER_FIELDS: &[&str] = &["title"];

/// Fields a note body may carry, in declaration order.
pub const NOTE_FIELDS: &[&str] = &["title", "content", "folder_id"];

/// A request body was rejected before reaching the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A mandatory field was absent (or null) on creation.
    #[error("Missing '{0}' in request body")]
    MissingField(&'static str),

    /// A field was present but structurally invalid.
    #[error("{message}")]
    Invalid {
        field: &'static str,
        message: String,
    },

    /// A partial update carried none of the accepted fields.
    #[error("Request body must contain {}", describe_fields(.0))]
    EmptyUpdate(&'static [&'static str]),
}

impl ValidationError {
    fn too_short(field: &'static str, min: usize) -> Self {
        Self::Invalid {
            field,
            message: format!("'{}' must be at least {} characters long", field, min),
        }
    }

    fn too_long(field: &'static str, max: usize) -> Self {
        Self::Invalid {
            field,
            message: format!("'{}' must be at most {} characters long", field, max),
        }
    }

    /// The field the error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField(field) | Self::Invalid { field, .. } => Some(*field),
            Self::EmptyUpdate(_) => None,
        }
    }
}

/// `["title"]` -> `a 'title'`, `["a", "b", "c"]` -> `a 'a', 'b', or 'c'`.
fn describe_fields(fields: &[&str]) -> String {
    let quoted: Vec<String> = fields.iter().map(|f| format!("'{}'", f)).collect();
    match quoted.as_slice() {
        [] => "a field".to_string(),
        [only] => format!("a {}", only),
        [first, second] => format!("a {} or {}", first, second),
        [init @ .., last] => format!("a {}, or {}", init.join(", "), last),
    }
}

fn check_folder_title(title: &str) -> Result<(), ValidationError> {
    let len = title.chars().count();
    if len < FOLDER_TITLE_MIN {
        return Err(ValidationError::too_short("title", FOLDER_TITLE_MIN));
    }
    if len > FOLDER_TITLE_MAX {
        return Err(ValidationError::too_long("title", FOLDER_TITLE_MAX));
    }
    Ok(())
}

fn check_note_title(title: &str) -> Result<(), ValidationError> {
    if title.chars().count() < NOTE_TITLE_MIN {
        return Err(ValidationError::too_short("title", NOTE_TITLE_MIN));
    }
    Ok(())
}

fn check_note_content(content: &str) -> Result<(), ValidationError> {
    if content.is_empty() {
        return Err(ValidationError::Invalid {
            field: "content",
            message: "'content' is required".to_string(),
        });
    }
    Ok(())
}

/// Empty strings count as "not supplied" in a partial update, as does a
/// non-positive `folder_id`.
fn supplied(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl CreateFolderRequest {
    /// Validate a folder creation body.
    ///
    /// An empty title is reported as missing, not as too short.
    pub fn validate(self) -> Result<NewFolder, ValidationError> {
        let title = supplied(self.title).ok_or(ValidationError::MissingField("title"))?;
        check_folder_title(&title)?;
        Ok(NewFolder { title })
    }
}

impl UpdateFolderRequest {
    /// Validate a folder PATCH body.
    pub fn validate(self) -> Result<FolderUpdate, ValidationError> {
        let title = supplied(self.title).ok_or(ValidationError::EmptyUpdate(FOLDER_FIELDS))?;
        check_folder_title(&title)?;
        Ok(FolderUpdate { title: Some(title) })
    }
}

impl CreateNoteRequest {
    /// Validate a note creation body.
    ///
    /// Presence of every mandatory field is checked before any field's
    /// content, so a body missing `folder_id` with a short title reports the
    /// missing field.
    pub fn validate(self) -> Result<NewNote, ValidationError> {
        let title = self.title.ok_or(ValidationError::MissingField("title"))?;
        let content = self
            .content
            .ok_or(ValidationError::MissingField("content"))?;
        let folder_id = self
            .folder_id
            .ok_or(ValidationError::MissingField("folder_id"))?;

        check_note_title(&title)?;
        check_note_content(&content)?;

        Ok(NewNote {
            title,
            content,
            folder_id,
            modified: self.modified,
        })
    }
}

impl UpdateNoteRequest {
    /// Validate a note PATCH body. Only supplied fields are checked.
    pub fn validate(self) -> Result<NoteUpdate, ValidationError> {
        let update = NoteUpdate {
            title: supplied(self.title),
            content: supplied(self.content),
            folder_id: self.folder_id.filter(|id| *id > 0),
        };

        if update.title.is_none() && update.content.is_none() && update.folder_id.is_none() {
            return Err(ValidationError::EmptyUpdate(NOTE_FIELDS));
        }
        if let Some(title) = &update.title {
            check_note_title(title)?;
        }
        if let Some(content) = &update.content {
            check_note_content(content)?;
        }

        Ok(update)
    }
}
