//! # quicknote-client
//!
//! Optimistic client for the quicknote API.
//!
//! - [`NotesApi`] / [`HttpNotesApi`]: the transport
//! - [`NotesState`]: the synchronous state machine behind the UI
//! - [`NotesController`]: async flows that drive the state over the transport
//! - [`NotesView`]: a render-ready snapshot
//!
//! ## Example
//!
//! ```rust,ignore
//! use quicknote_client::{HttpNotesApi, NotesController, UiEvent};
//!
//! let controller = NotesController::new(HttpNotesApi::new("http://localhost:3000")?);
//! controller.dispatch(UiEvent::Load).await;
//! controller.dispatch(UiEvent::DraftChanged("Buy milk".into())).await;
//! controller.dispatch(UiEvent::Submit).await;
//! println!("{}", controller.view().await);
//! ```

pub mod api;
pub mod cli;
pub mod controller;
pub mod error;
pub mod state;
pub mod view;

pub use api::{HttpNotesApi, NotesApi};
pub use controller::{NotesController, UiEvent};
pub use error::{ClientError, ClientErrorKind, Result};
pub use state::{
    Confirmation, LastError, NoteEntry, NoteKey, NotesState, Operation, PendingCreate,
    PendingDelete,
};
pub use view::{NoteRow, NotesView};
