//! Async driver for [`NotesState`].
//!
//! The controller owns the state behind a `tokio::sync::Mutex` and the
//! transport behind [`NotesApi`]. The lock is only held for synchronous
//! transitions, never across a network call, so flows started from several
//! tasks interleave only at network boundaries.

use std::time::Instant;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use quicknote_core::Note;

use crate::api::NotesApi;
use crate::error::ClientError;
use crate::state::NotesState;
use crate::view::NotesView;

/// Input events from a front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Load,
    DraftChanged(String),
    Submit,
    DeleteRequested(Uuid),
    DeleteConfirmed,
    DeleteCancelled,
}

pub struct NotesController<A> {
    api: A,
    state: Mutex<NotesState>,
}

impl<A: NotesApi> NotesController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Mutex::new(NotesState::new()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> NotesState {
        self.state.lock().await.clone()
    }

    pub async fn view(&self) -> NotesView {
        NotesView::from_state(&*self.state.lock().await)
    }

    pub async fn dispatch(&self, event: UiEvent) {
        match event {
            UiEvent::Load => self.load().await,
            UiEvent::DraftChanged(text) => self.set_draft(text).await,
            UiEvent::Submit => {
                self.submit().await;
            }
            UiEvent::DeleteRequested(id) => {
                self.request_delete(id).await;
            }
            UiEvent::DeleteConfirmed => {
                self.confirm_delete().await;
            }
            UiEvent::DeleteCancelled => self.cancel_delete().await,
        }
    }

    /// Fetch the list and replace local notes with it.
    pub async fn load(&self) {
        self.state.lock().await.begin_list();

        let start = Instant::now();
        let result = self.api.list().await;
        match &result {
            Ok(notes) => debug!(
                subsystem = "client",
                component = "controller",
                op = "list",
                result_count = notes.len(),
                duration_ms = start.elapsed().as_millis() as u64,
                "Loaded notes"
            ),
            Err(e) => warn!(
                subsystem = "client",
                component = "controller",
                op = "list",
                error = %e,
                "Could not load notes"
            ),
        }

        self.state.lock().await.finish_list(result);
    }

    pub async fn set_draft(&self, text: impl Into<String>) {
        self.state.lock().await.set_draft(text);
    }

    /// Submit the draft optimistically.
    ///
    /// Returns `None` when the draft was blank and nothing was sent.
    pub async fn submit(&self) -> Option<Result<Note, ClientError>> {
        let pending = self.state.lock().await.begin_create()?;
        debug!(
            subsystem = "client",
            component = "controller",
            op = "create",
            temp_id = %pending.temp_id,
            text_len = pending.text.len(),
            "Provisional note added"
        );

        let result = self.api.create(&pending.text).await;
        match &result {
            Ok(note) => info!(
                subsystem = "client",
                component = "controller",
                op = "create",
                temp_id = %pending.temp_id,
                note_id = %note.id,
                "Note confirmed"
            ),
            Err(e) => warn!(
                subsystem = "client",
                component = "controller",
                op = "create",
                temp_id = %pending.temp_id,
                error = %e,
                "Failed to add note"
            ),
        }

        let resync = self
            .state
            .lock()
            .await
            .finish_create(&pending, result.clone());
        if resync {
            self.load().await;
        }
        Some(result)
    }

    /// Enter the confirmation state for `id`. Returns `false` if the note is
    /// unknown or still provisional.
    pub async fn request_delete(&self, id: Uuid) -> bool {
        self.state.lock().await.request_delete(id)
    }

    pub async fn cancel_delete(&self) {
        self.state.lock().await.cancel_delete();
    }

    /// Carry out the pending delete optimistically.
    ///
    /// Returns `None` when no delete was pending.
    pub async fn confirm_delete(&self) -> Option<Result<bool, ClientError>> {
        let pending = self.state.lock().await.begin_delete()?;
        let id = pending.id();

        let result = self.api.delete(id).await.map(|resp| resp.deleted);
        match &result {
            Ok(deleted) => info!(
                subsystem = "client",
                component = "controller",
                op = "delete",
                note_id = %id,
                deleted,
                "Note deleted"
            ),
            Err(e) => warn!(
                subsystem = "client",
                component = "controller",
                op = "delete",
                note_id = %id,
                error = %e,
                "Failed to delete"
            ),
        }

        let resync = self
            .state
            .lock()
            .await
            .finish_delete(pending, result.clone().map(|_| ()));
        if resync {
            self.load().await;
        }
        Some(result)
    }
}
