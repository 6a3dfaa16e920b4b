//! Presentation snapshot of [`NotesState`].

use std::fmt;

use crate::error::ClientErrorKind;
use crate::state::{Confirmation, LastError, NotesState, Operation};

pub const LOADING_LABEL: &str = "Loading...";
pub const SUBMIT_LABEL: &str = "Add";
pub const SUBMITTING_LABEL: &str = "Adding...";
pub const EMPTY_MESSAGE: &str = "No notes yet — add one above ✨";
pub const CONFIRM_PROMPT: &str = "Delete this note?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow {
    pub text: String,
    /// `ID: <id>`; provisional rows show their temporary id.
    pub id_label: String,
    pub provisional: bool,
    /// The row awaiting delete confirmation.
    pub confirming: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesView {
    pub header: String,
    pub submit_label: &'static str,
    pub error: Option<String>,
    pub empty_message: Option<&'static str>,
    pub confirm_prompt: Option<&'static str>,
    pub rows: Vec<NoteRow>,
}

impl NotesView {
    pub fn from_state(state: &NotesState) -> Self {
        let header = if state.is_loading_list() {
            LOADING_LABEL.to_string()
        } else {
            format!("{} note(s)", state.notes.len())
        };

        let submit_label = if state.is_submitting_create() {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        };

        let confirming = match state.confirmation {
            Confirmation::PendingConfirmation(id) => Some(id),
            Confirmation::None => None,
        };

        let rows = state
            .notes
            .iter()
            .map(|entry| NoteRow {
                text: entry.text.clone(),
                id_label: format!("ID: {}", entry.id()),
                provisional: entry.is_provisional(),
                confirming: !entry.is_provisional() && confirming == Some(entry.id()),
            })
            .collect::<Vec<_>>();

        let empty_message =
            (rows.is_empty() && !state.is_loading_list()).then_some(EMPTY_MESSAGE);

        Self {
            header,
            submit_label,
            error: state.last_error.as_ref().map(error_message),
            empty_message,
            confirm_prompt: confirming.map(|_| CONFIRM_PROMPT),
            rows,
        }
    }
}

/// User-facing text for a recorded error, branched on its kind.
pub fn error_message(last: &LastError) -> String {
    let base = match last.operation {
        Operation::List => "Could not load notes",
        Operation::Create => "Failed to add note",
        Operation::Delete => "Failed to delete",
    };
    let detail = match last.error.kind {
        ClientErrorKind::Network => "server unreachable".to_string(),
        ClientErrorKind::Decode => "unexpected response".to_string(),
        ClientErrorKind::Unavailable => "storage unavailable, try again shortly".to_string(),
        ClientErrorKind::InvalidInput | ClientErrorKind::NotFound => last.error.message.clone(),
        ClientErrorKind::Server => "server error".to_string(),
    };
    format!("{}: {}", base, detail)
}

impl fmt::Display for NotesView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        if let Some(error) = &self.error {
            writeln!(f, "! {}", error)?;
        }
        if let Some(empty) = self.empty_message {
            writeln!(f, "{}", empty)?;
        }
        for row in &self.rows {
            let marker = if row.provisional {
                " (saving)"
            } else if row.confirming {
                " (delete?)"
            } else {
                ""
            };
            writeln!(f, "- {}{}", row.text, marker)?;
            writeln!(f, "  {}", row.id_label)?;
        }
        Ok(())
    }
}
