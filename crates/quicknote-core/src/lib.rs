//! # quicknote-core
//!
//! Core types, traits, and abstractions for quicknote.
//!
//! This crate provides the note model, the wire types spoken by the API, the
//! shared error taxonomy, and the repository trait that persistence backends
//! implement.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;
pub mod uuid_utils;

// Re-export commonly used types at crate root
pub use error::{Error, ErrorKind, Result};
pub use models::*;
pub use traits::*;
pub use uuid_utils::{new_v7, parse_note_id};
