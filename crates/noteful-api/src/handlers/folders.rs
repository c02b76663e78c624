//! `/api/folders` handlers.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use noteful_core::{
    CreateFolderRequest, Folder, FolderRepository, FolderUpdate, UpdateFolderRequest,
};

use super::FOLDERS_PATH;
use crate::error::ApiError;
use crate::extract::{JsonBody, RequestContext, Resolved, Resource};
use crate::state::AppState;

#[axum::async_trait]
impl Resource for Folder {
    const NAME: &'static str = "Folder";

    async fn lookup(state: &AppState, id: i32) -> noteful_core::Result<Option<Self>> {
        state.folders.get(id).await
    }
}

pub async fn list_folders(State(state): State<AppState>) -> Result<Json<Vec<Folder>>, ApiError> {
    let folders = state.folders.list().await?;
    Ok(Json(folders.iter().map(Folder::sanitized).collect()))
}

pub async fn create_folder(
    State(state): State<AppState>,
    ctx: RequestContext,
    JsonBody(body): JsonBody<CreateFolderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new = body.validate().map_err(|e| ctx.reject(e))?;
    let folder = state.folders.insert(new).await?;
    tracing::info!(folder_id = folder.id, "Folder created");

    let location = format!("{}/{}", FOLDERS_PATH, folder.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(folder.sanitized()),
    ))
}

pub async fn get_folder(Resolved(folder): Resolved<Folder>) -> Json<Folder> {
    Json(folder.sanitized())
}

pub async fn delete_folder(
    State(state): State<AppState>,
    Resolved(folder): Resolved<Folder>,
) -> Result<StatusCode, ApiError> {
    state.folders.delete(folder.id).await?;
    tracing::info!(folder_id = folder.id, "Folder deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_folder(
    State(state): State<AppState>,
    ctx: RequestContext,
    Resolved(folder): Resolved<Folder>,
    JsonBody(body): JsonBody<UpdateFolderRequest>,
) -> Result<StatusCode, ApiError> {
    let update: FolderUpdate = body.validate().map_err(|e| ctx.reject(e))?;
    state.folders.update(folder.id, update).await?;
    Ok(StatusCode::NO_CONTENT)
}
