//! Core traits for quicknote abstractions.
//!
//! These traits define the interfaces that concrete persistence backends
//! must satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::Note;

// =============================================================================
// NOTE REPOSITORY TRAITS
// =============================================================================

/// Repository for note persistence.
///
/// Implementations assign `id` and `created_at` on insert and must be safe to
/// share across concurrent request handlers.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a new note and return it as stored.
    async fn insert(&self, text: &str) -> Result<Note>;

    /// List every note in creation order (oldest first).
    async fn list(&self) -> Result<Vec<Note>>;

    /// Delete a note by id.
    ///
    /// Returns `false` when no note matched. Deleting a missing note is not
    /// an error.
    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// Check if a note exists.
    async fn exists(&self, id: Uuid) -> Result<bool>;
}
