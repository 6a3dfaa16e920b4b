//! Note HTTP handlers.
//!
//! Three stateless endpoints over the injected [`NoteRepository`]:
//! list, create, and delete-by-id. Each maps to exactly one repository call.

use std::time::Instant;

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use tracing::{debug, info};

use quicknote_core::{
    parse_note_id, CreateNoteRequest, DeleteNoteRequest, DeleteNoteResponse, Note,
};

use crate::{ApiError, AppState};

/// List every note in creation order (oldest first).
///
/// # Returns
/// - 200 OK with the array of notes
/// - 503 Service Unavailable if the database cannot be reached
/// - 500 Internal Server Error for any other persistence failure
#[utoipa::path(
    get,
    path = "/api/notes",
    tag = "Notes",
    responses(
        (status = 200, description = "All notes, oldest first", body = [Note]),
        (status = 500, description = "Persistence failure", body = quicknote_core::ErrorResponse),
        (status = 503, description = "Persistence unavailable", body = quicknote_core::ErrorResponse),
    )
)]
pub async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<Note>>, ApiError> {
    let start = Instant::now();
    let notes = state.notes.list().await?;
    debug!(
        subsystem = "api",
        component = "notes",
        op = "list",
        result_count = notes.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Listed notes"
    );
    Ok(Json(notes))
}

/// Create a note from `{text}`.
///
/// Blank or whitespace-only text is rejected before touching persistence.
/// The stored text is exactly what was submitted.
///
/// # Returns
/// - 201 Created with the stored note
/// - 400 Bad Request for blank text or a malformed body
/// - 413 Payload Too Large when the body exceeds the configured limit
/// - 500/503 on persistence failure
#[utoipa::path(
    post,
    path = "/api/notes",
    tag = "Notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created", body = Note),
        (status = 400, description = "Blank text or malformed body", body = quicknote_core::ErrorResponse),
        (status = 413, description = "Body exceeds MAX_BODY_BYTES", body = quicknote_core::ErrorResponse),
        (status = 500, description = "Persistence failure", body = quicknote_core::ErrorResponse),
        (status = 503, description = "Persistence unavailable", body = quicknote_core::ErrorResponse),
    )
)]
pub async fn create_note(
    State(state): State<AppState>,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let Json(body) = payload?;

    if body.text.trim().is_empty() {
        return Err(ApiError::BadRequest("text is required".to_string()));
    }

    let note = state.notes.insert(&body.text).await?;
    info!(
        subsystem = "api",
        component = "notes",
        op = "create",
        note_id = %note.id,
        text_len = note.text.len(),
        "Created note"
    );
    Ok((StatusCode::CREATED, Json(note)))
}

/// Delete a note by `{id}`.
///
/// Deleting an id that does not exist succeeds with `deleted: false`, so the
/// call is idempotent.
///
/// # Returns
/// - 200 OK with `{message, deleted}`
/// - 400 Bad Request if `id` is not a valid note id or the body is malformed
/// - 500/503 on persistence failure
#[utoipa::path(
    delete,
    path = "/api/notes",
    tag = "Notes",
    request_body = DeleteNoteRequest,
    responses(
        (status = 200, description = "Note deleted (or already absent)", body = DeleteNoteResponse),
        (status = 400, description = "Malformed id or body", body = quicknote_core::ErrorResponse),
        (status = 500, description = "Persistence failure", body = quicknote_core::ErrorResponse),
        (status = 503, description = "Persistence unavailable", body = quicknote_core::ErrorResponse),
    )
)]
pub async fn delete_note(
    State(state): State<AppState>,
    payload: Result<Json<DeleteNoteRequest>, JsonRejection>,
) -> Result<Json<DeleteNoteResponse>, ApiError> {
    let Json(body) = payload?;
    let id = parse_note_id(&body.id)?;

    let deleted = state.notes.delete(id).await?;
    info!(
        subsystem = "api",
        component = "notes",
        op = "delete",
        note_id = %id,
        deleted,
        "Deleted note"
    );
    Ok(Json(DeleteNoteResponse::new(deleted)))
}
