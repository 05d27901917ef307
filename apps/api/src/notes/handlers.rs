use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::note::CustomerNoteRow;
use crate::models::UserIdQuery;
use crate::notes::store::{delete_note, get_note, list_notes, save_note, update_note};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListNotesQuery {
    pub user_id: Uuid,
    pub customer_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveNoteRequest {
    pub user_id: Uuid,
    pub customer_name: String,
    pub note_content: String,
    pub note_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateNoteRequest {
    pub user_id: Uuid,
    pub note_content: Option<String>,
    pub note_type: Option<String>,
}

#[derive(Serialize)]
pub struct NoteListResponse {
    pub notes: Vec<CustomerNoteRow>,
    pub total: usize,
}

fn note_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("note {id}"))
}

/// GET /api/v1/notes
pub async fn handle_list_notes(
    State(state): State<AppState>,
    Query(params): Query<ListNotesQuery>,
) -> Result<Json<NoteListResponse>, AppError> {
    let notes = list_notes(&state.db, params.user_id, params.customer_name.as_deref()).await?;
    let total = notes.len();
    Ok(Json(NoteListResponse { notes, total }))
}

/// POST /api/v1/notes
pub async fn handle_save_note(
    State(state): State<AppState>,
    Json(req): Json<SaveNoteRequest>,
) -> Result<(StatusCode, Json<CustomerNoteRow>), AppError> {
    let note = save_note(
        &state.db,
        req.user_id,
        &req.customer_name,
        &req.note_content,
        req.note_type.as_deref(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /api/v1/notes/:id
pub async fn handle_get_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<CustomerNoteRow>, AppError> {
    get_note(&state.db, params.user_id, id)
        .await?
        .map(Json)
        .ok_or_else(|| note_not_found(id))
}

/// PATCH /api/v1/notes/:id
pub async fn handle_update_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateNoteRequest>,
) -> Result<Json<CustomerNoteRow>, AppError> {
    update_note(
        &state.db,
        req.user_id,
        id,
        req.note_content.as_deref(),
        req.note_type.as_deref(),
    )
    .await?
    .map(Json)
    .ok_or_else(|| note_not_found(id))
}

/// DELETE /api/v1/notes/:id
pub async fn handle_delete_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    if delete_note(&state.db, params.user_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(note_not_found(id))
    }
}
