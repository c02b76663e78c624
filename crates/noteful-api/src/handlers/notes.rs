//! `/api/notes` handlers.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use noteful_core::{CreateNoteRequest, Note, NoteRepository, UpdateNoteRequest};

use super::NOTES_PATH;
use crate::error::ApiError;
use crate::extract::{JsonBody, RequestContext, Resolved, Resource};
use crate::state::AppState;

#[axum::async_trait]
impl Resource for Note {
    const NAME: &'static str = "Note";

    async fn lookup(state: &AppState, id: i32) -> noteful_core::Result<Option<Self>> {
        state.notes.get(id).await
    }
}

pub async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state.notes.list().await?;
    Ok(Json(notes.iter().map(Note::sanitized).collect()))
}

pub async fn create_note(
    State(state): State<AppState>,
    ctx: RequestContext,
    JsonBody(body): JsonBody<CreateNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new = body.validate().map_err(|e| ctx.reject(e))?;
    let note = state.notes.insert(new).await?;
    tracing::info!(note_id = note.id, folder_id = note.folder_id, "Note created");

    let location = format!("{}/{}", NOTES_PATH, note.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(note.sanitized()),
    ))
}

pub async fn get_note(Resolved(note): Resolved<Note>) -> Json<Note> {
    Json(note.sanitized())
}

pub async fn delete_note(
    State(state): State<AppState>,
    Resolved(note): Resolved<Note>,
) -> Result<StatusCode, ApiError> {
    state.notes.delete(note.id).await?;
    tracing::info!(note_id = note.id, "Note deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_note(
    State(state): State<AppState>,
    ctx: RequestContext,
    Resolved(note): Resolved<Note>,
    JsonBody(body): JsonBody<UpdateNoteRequest>,
) -> Result<StatusCode, ApiError> {
    let update = body.validate().map_err(|e| ctx.reject(e))?;
    state.notes.update(note.id, update).await?;
    Ok(StatusCode::NO_CONTENT)
}
