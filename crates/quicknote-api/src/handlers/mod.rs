//! HTTP handlers for quicknote-api.

pub mod notes;
pub mod system;

pub use notes::{create_note, delete_note, list_notes};
pub use system::{health_check, openapi_json};
