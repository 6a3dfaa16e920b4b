//! Data models shared by the API server, the persistence layer, and clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ErrorKind;

// =============================================================================
// NOTE
// =============================================================================

/// A persisted note.
///
/// `id` and `created_at` are assigned by the persistence layer on insert.
/// Notes are immutable once stored; the only other transition is deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Note {
    pub id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Creation-order key: timestamp first, id as tie-breaker.
    pub fn order_key(&self) -> (DateTime<Utc>, Uuid) {
        (self.created_at, self.id)
    }
}

/// Sort notes into creation order (oldest first).
pub fn sort_by_creation(notes: &mut [Note]) {
    notes.sort_by_key(Note::order_key);
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Body of `POST /api/notes`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateNoteRequest {
    pub text: String,
}

impl CreateNoteRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Body of `DELETE /api/notes`. The id travels in its string form.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteNoteRequest {
    pub id: String,
}

/// Success body of `DELETE /api/notes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteNoteResponse {
    pub message: String,
    /// False when no note matched; deleting a missing note is still a success.
    pub deleted: bool,
}

impl DeleteNoteResponse {
    pub const MESSAGE: &'static str = "Note deleted";

    pub fn new(deleted: bool) -> Self {
        Self {
            message: Self::MESSAGE.to_string(),
            deleted,
        }
    }
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: ErrorKind,
}
