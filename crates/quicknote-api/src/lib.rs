//! # quicknote-api
//!
//! HTTP surface for quicknote: list, create and delete notes over JSON.
//!
//! The persistence backend is injected through [`AppState`], so the same
//! router runs against PostgreSQL in production and an in-memory store in
//! tests.

pub mod config;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod telemetry;

use std::sync::Arc;

use quicknote_core::NoteRepository;

pub use config::{ServerConfig, StorageBackend};
pub use error::ApiError;
pub use routes::build_router;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub notes: Arc<dyn NoteRepository>,
}

impl AppState {
    pub fn new(notes: Arc<dyn NoteRepository>) -> Self {
        Self { notes }
    }
}
