//! Client-side notes state and its transitions.
//!
//! [`NotesState`] is a plain value: every method is a synchronous transition
//! and no method performs I/O. Flows that talk to the server are split into a
//! `begin`/`finish` pair so the caller can await the network in between
//! without holding the state.
//!
//! Reconciliation after a failed call is by note id: a rolled-back delete
//! puts back exactly the note it removed (if it is still absent), and a
//! rolled-back create drops exactly its provisional entry. Neither restores a
//! whole-list snapshot, so concurrent flows never undo each other.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use quicknote_core::{sort_by_creation, Note};

use crate::error::ClientError;

/// Identity of a displayed note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteKey {
    /// Locally synthesized id; the create call has not answered yet.
    Provisional(Uuid),
    /// Server-assigned id.
    Confirmed(Uuid),
}

impl NoteKey {
    pub fn id(&self) -> Uuid {
        match self {
            NoteKey::Provisional(id) | NoteKey::Confirmed(id) => *id,
        }
    }
}

/// One row of the client's note list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEntry {
    pub key: NoteKey,
    pub text: String,
    /// Absent while provisional.
    pub created_at: Option<DateTime<Utc>>,
}

impl NoteEntry {
    pub fn provisional(temp_id: Uuid, text: impl Into<String>) -> Self {
        Self {
            key: NoteKey::Provisional(temp_id),
            text: text.into(),
            created_at: None,
        }
    }

    pub fn is_provisional(&self) -> bool {
        matches!(self.key, NoteKey::Provisional(_))
    }

    pub fn id(&self) -> Uuid {
        self.key.id()
    }
}

impl From<Note> for NoteEntry {
    fn from(note: Note) -> Self {
        Self {
            key: NoteKey::Confirmed(note.id),
            text: note.text,
            created_at: Some(note.created_at),
        }
    }
}

/// Delete confirmation dialog state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Confirmation {
    #[default]
    None,
    /// Waiting for the user to confirm or cancel deleting this note.
    PendingConfirmation(Uuid),
}

/// The flow a recorded error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastError {
    pub operation: Operation,
    pub error: ClientError,
}

/// A create whose server call is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCreate {
    pub temp_id: Uuid,
    pub text: String,
}

/// A delete whose server call is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub entry: NoteEntry,
    /// Index the entry occupied when it was removed.
    pub position: usize,
}

impl PendingDelete {
    pub fn id(&self) -> Uuid {
        self.entry.id()
    }
}

/// Everything the client shows, most recent note first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesState {
    pub notes: Vec<NoteEntry>,
    pub draft_text: String,
    pub last_error: Option<LastError>,
    pub confirmation: Confirmation,
    lists_in_flight: usize,
    creates_in_flight: usize,
}

impl NotesState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading_list(&self) -> bool {
        self.lists_in_flight > 0
    }

    pub fn is_submitting_create(&self) -> bool {
        self.creates_in_flight > 0
    }

    pub fn position_of(&self, key: NoteKey) -> Option<usize> {
        self.notes.iter().position(|n| n.key == key)
    }

    pub fn contains_confirmed(&self, id: Uuid) -> bool {
        self.position_of(NoteKey::Confirmed(id)).is_some()
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft_text = text.into();
    }

    fn record_error(&mut self, operation: Operation, error: ClientError) {
        self.last_error = Some(LastError { operation, error });
    }

    // ─── List ──────────────────────────────────────────────────────────────

    pub fn begin_list(&mut self) {
        self.lists_in_flight += 1;
    }

    /// Apply a list result. Success replaces the whole list; failure keeps it.
    pub fn finish_list(&mut self, result: Result<Vec<Note>, ClientError>) {
        self.lists_in_flight = self.lists_in_flight.saturating_sub(1);
        match result {
            Ok(mut notes) => {
                sort_by_creation(&mut notes);
                self.notes = notes.into_iter().rev().map(NoteEntry::from).collect();
                if let Confirmation::PendingConfirmation(id) = self.confirmation {
                    if !self.contains_confirmed(id) {
                        self.confirmation = Confirmation::None;
                    }
                }
            }
            Err(error) => self.record_error(Operation::List, error),
        }
    }

    // ─── Create ────────────────────────────────────────────────────────────

    /// Start an optimistic create from the draft.
    ///
    /// Returns `None` for a blank draft. Otherwise the provisional entry is
    /// at the head of the list and the draft is cleared.
    pub fn begin_create(&mut self) -> Option<PendingCreate> {
        if self.draft_text.trim().is_empty() {
            return None;
        }
        let text = std::mem::take(&mut self.draft_text);
        let temp_id = Uuid::new_v4();
        self.notes.insert(0, NoteEntry::provisional(temp_id, text.clone()));
        self.creates_in_flight += 1;
        Some(PendingCreate { temp_id, text })
    }

    /// Reconcile a create. Returns `true` when the caller should resync.
    pub fn finish_create(
        &mut self,
        pending: &PendingCreate,
        result: Result<Note, ClientError>,
    ) -> bool {
        self.creates_in_flight = self.creates_in_flight.saturating_sub(1);
        let provisional = self.position_of(NoteKey::Provisional(pending.temp_id));

        match result {
            Ok(note) => {
                let already_listed = self.contains_confirmed(note.id);
                match provisional {
                    Some(pos) if already_listed => {
                        self.notes.remove(pos);
                    }
                    Some(pos) => self.notes[pos] = NoteEntry::from(note),
                    None if already_listed => {}
                    None => self.insert_confirmed(NoteEntry::from(note)),
                }
                false
            }
            Err(error) => {
                if let Some(pos) = provisional {
                    self.notes.remove(pos);
                }
                self.record_error(Operation::Create, error);
                true
            }
        }
    }

    /// Insert a confirmed entry ahead of the first older confirmed entry.
    fn insert_confirmed(&mut self, entry: NoteEntry) {
        let pos = self
            .notes
            .iter()
            .position(|n| match (n.created_at, entry.created_at) {
                (Some(existing), Some(new)) => (existing, n.id()) < (new, entry.id()),
                _ => false,
            })
            .unwrap_or(self.notes.len());
        self.notes.insert(pos, entry);
    }

    // ─── Delete ────────────────────────────────────────────────────────────

    /// Ask for confirmation before deleting `id`.
    ///
    /// Only confirmed notes can be deleted. Returns `false` (and leaves the
    /// confirmation state alone) for provisional or unknown ids.
    pub fn request_delete(&mut self, id: Uuid) -> bool {
        if !self.contains_confirmed(id) {
            return false;
        }
        self.confirmation = Confirmation::PendingConfirmation(id);
        true
    }

    pub fn cancel_delete(&mut self) {
        self.confirmation = Confirmation::None;
    }

    /// Resolve a pending confirmation by removing the note optimistically.
    ///
    /// Returns `None` if nothing was pending or the note is already gone.
    pub fn begin_delete(&mut self) -> Option<PendingDelete> {
        let Confirmation::PendingConfirmation(id) = std::mem::take(&mut self.confirmation)
        else {
            return None;
        };
        let position = self.position_of(NoteKey::Confirmed(id))?;
        let entry = self.notes.remove(position);
        Some(PendingDelete { entry, position })
    }

    /// Reconcile a delete. Returns `true` when the caller should resync.
    pub fn finish_delete(
        &mut self,
        pending: PendingDelete,
        result: Result<(), ClientError>,
    ) -> bool {
        match result {
            Ok(()) => {
                // A resync that read the list before the server applied the
                // delete may have put the note back.
                let key = NoteKey::Confirmed(pending.id());
                self.notes.retain(|n| n.key != key);
                false
            }
            Err(error) => {
                if !self.contains_confirmed(pending.id()) {
                    let pos = pending.position.min(self.notes.len());
                    self.notes.insert(pos, pending.entry);
                }
                self.record_error(Operation::Delete, error);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientErrorKind;
    use chrono::Duration;

    fn note(text: &str, secs: i64) -> Note {
        Note {
            id: Uuid::now_v7(),
            text: text.to_string(),
            created_at: DateTime::<Utc>::from_timestamp(1_700_000_000 + secs, 0).unwrap(),
        }
    }

    fn texts(state: &NotesState) -> Vec<&str> {
        state.notes.iter().map(|n| n.text.as_str()).collect()
    }

    fn failure() -> ClientError {
        ClientError::new(ClientErrorKind::Unavailable, "persistence down")
    }

    fn loaded(notes: Vec<Note>) -> NotesState {
        let mut state = NotesState::new();
        state.begin_list();
        state.finish_list(Ok(notes));
        state
    }

    #[test]
    fn test_list_displays_most_recent_first() {
        let state = loaded(vec![note("T1", 1), note("T2", 2), note("T3", 3)]);
        assert_eq!(texts(&state), vec!["T3", "T2", "T1"]);
        assert!(!state.is_loading_list());
    }

    #[test]
    fn test_list_orders_by_timestamp_not_arrival() {
        let state = loaded(vec![note("T2", 2), note("T3", 3), note("T1", 1)]);
        assert_eq!(texts(&state), vec!["T3", "T2", "T1"]);
    }

    #[test]
    fn test_list_failure_keeps_notes() {
        let mut state = loaded(vec![note("kept", 1)]);
        state.begin_list();
        assert!(state.is_loading_list());
        state.finish_list(Err(failure()));

        assert_eq!(texts(&state), vec!["kept"]);
        assert!(!state.is_loading_list());
        assert_eq!(state.last_error.unwrap().operation, Operation::List);
    }

    #[test]
    fn test_blank_draft_is_noop() {
        let mut state = NotesState::new();
        state.set_draft("   \n");
        assert!(state.begin_create().is_none());
        assert!(state.notes.is_empty());
        assert!(!state.is_submitting_create());
        assert_eq!(state.draft_text, "   \n");
    }

    #[test]
    fn test_create_is_optimistic_then_confirmed_in_place() {
        let mut state = loaded(vec![note("old", 1)]);
        state.set_draft("Buy milk");
        let pending = state.begin_create().unwrap();

        assert!(state.draft_text.is_empty());
        assert!(state.is_submitting_create());
        assert_eq!(texts(&state), vec!["Buy milk", "old"]);
        assert!(state.notes[0].is_provisional());

        let saved = note("Buy milk", 2);
        assert!(!state.finish_create(&pending, Ok(saved.clone())));

        assert_eq!(state.notes.len(), 2);
        assert_eq!(state.notes[0].key, NoteKey::Confirmed(saved.id));
        assert!(!state.is_submitting_create());
    }

    #[test]
    fn test_create_failure_drops_provisional() {
        let mut state = loaded(vec![note("old", 1)]);
        state.set_draft("doomed");
        let pending = state.begin_create().unwrap();

        assert!(state.finish_create(&pending, Err(failure())));
        assert_eq!(texts(&state), vec!["old"]);
        assert_eq!(state.last_error.unwrap().operation, Operation::Create);
    }

    #[test]
    fn test_create_confirmed_after_resync_added_once() {
        let mut state = NotesState::new();
        state.set_draft("raced");
        let pending = state.begin_create().unwrap();

        // A resync that already includes the persisted note replaces the list.
        let saved = note("raced", 5);
        state.begin_list();
        state.finish_list(Ok(vec![note("older", 1), saved.clone()]));
        assert!(!state.finish_create(&pending, Ok(saved.clone())));

        assert_eq!(texts(&state), vec!["raced", "older"]);
    }

    #[test]
    fn test_create_confirmed_after_resync_without_it() {
        let mut state = NotesState::new();
        state.set_draft("late");
        let pending = state.begin_create().unwrap();

        state.begin_list();
        state.finish_list(Ok(vec![note("a", 1), note("c", 30)]));
        let saved = note("late", 10);
        state.finish_create(&pending, Ok(saved));

        assert_eq!(texts(&state), vec!["c", "late", "a"]);
    }

    #[test]
    fn test_concurrent_creates_keep_their_slots() {
        let mut state = NotesState::new();
        state.set_draft("first");
        let first = state.begin_create().unwrap();
        state.set_draft("second");
        let second = state.begin_create().unwrap();
        assert_eq!(texts(&state), vec!["second", "first"]);

        state.finish_create(&first, Ok(note("first", 1)));
        assert!(state.is_submitting_create());
        state.finish_create(&second, Ok(note("second", 2)));

        assert_eq!(texts(&state), vec!["second", "first"]);
        assert!(state.notes.iter().all(|n| !n.is_provisional()));
    }

    #[test]
    fn test_provisional_note_cannot_be_deleted() {
        let mut state = NotesState::new();
        state.set_draft("in flight");
        let pending = state.begin_create().unwrap();

        assert!(!state.request_delete(pending.temp_id));
        assert_eq!(state.confirmation, Confirmation::None);
    }

    #[test]
    fn test_delete_waits_for_confirmation() {
        let target = note("target", 1);
        let mut state = loaded(vec![target.clone()]);

        assert!(state.request_delete(target.id));
        assert_eq!(
            state.confirmation,
            Confirmation::PendingConfirmation(target.id)
        );
        assert_eq!(state.notes.len(), 1);

        state.cancel_delete();
        assert_eq!(state.confirmation, Confirmation::None);
        assert!(state.begin_delete().is_none());
        assert_eq!(state.notes.len(), 1);
    }

    #[test]
    fn test_delete_success_removes() {
        let target = note("target", 1);
        let mut state = loaded(vec![target.clone(), note("other", 2)]);
        state.request_delete(target.id);
        let pending = state.begin_delete().unwrap();

        assert_eq!(texts(&state), vec!["other"]);
        assert!(!state.finish_delete(pending, Ok(())));
        assert_eq!(texts(&state), vec!["other"]);
    }

    #[test]
    fn test_delete_success_after_stale_resync_removes() {
        let (a, b) = (note("a", 1), note("b", 2));
        let mut state = loaded(vec![a.clone(), b.clone()]);
        state.request_delete(a.id);
        let pending = state.begin_delete().unwrap();

        // This list was read before the server applied the delete.
        state.begin_list();
        state.finish_list(Ok(vec![a.clone(), b]));
        assert!(state.contains_confirmed(a.id));

        assert!(!state.finish_delete(pending, Ok(())));
        assert!(!state.contains_confirmed(a.id));
        assert_eq!(texts(&state), vec!["b"]);
    }

    #[test]
    fn test_delete_failure_restores_position() {
        let (a, b, c) = (note("a", 1), note("b", 2), note("c", 3));
        let mut state = loaded(vec![a, b.clone(), c]);
        state.request_delete(b.id);
        let pending = state.begin_delete().unwrap();
        assert_eq!(pending.position, 1);

        assert!(state.finish_delete(pending, Err(failure())));
        assert_eq!(texts(&state), vec!["c", "b", "a"]);
        assert_eq!(state.last_error.unwrap().operation, Operation::Delete);
    }

    #[test]
    fn test_failed_delete_does_not_resurrect_other_deletes() {
        let (a, b, c) = (note("a", 1), note("b", 2), note("c", 3));
        let mut state = loaded(vec![a.clone(), b.clone(), c]);

        state.request_delete(a.id);
        let slow = state.begin_delete().unwrap();

        state.request_delete(b.id);
        let fast = state.begin_delete().unwrap();
        state.finish_delete(fast, Ok(()));

        state.finish_delete(slow, Err(failure()));
        assert_eq!(texts(&state), vec!["c", "a"]);
    }

    #[test]
    fn test_failed_delete_skips_restore_if_already_back() {
        let a = note("a", 1);
        let mut state = loaded(vec![a.clone()]);
        state.request_delete(a.id);
        let pending = state.begin_delete().unwrap();

        state.begin_list();
        state.finish_list(Ok(vec![a.clone()]));
        state.finish_delete(pending, Err(failure()));

        assert_eq!(state.notes.len(), 1);
    }

    #[test]
    fn test_resync_clears_confirmation_for_vanished_note() {
        let a = note("a", 1);
        let mut state = loaded(vec![a.clone()]);
        state.request_delete(a.id);

        state.begin_list();
        state.finish_list(Ok(vec![]));
        assert_eq!(state.confirmation, Confirmation::None);
    }

    #[test]
    fn test_insert_confirmed_orders_equal_timestamps_by_id() {
        let mut state = NotesState::new();
        let base = note("x", 0);
        let later = Note {
            id: Uuid::now_v7(),
            text: "y".into(),
            created_at: base.created_at,
        };
        state.insert_confirmed(NoteEntry::from(base.clone()));
        state.insert_confirmed(NoteEntry::from(later.clone()));
        assert_eq!(state.notes[0].id(), later.id);

        let older = Note {
            created_at: base.created_at - Duration::seconds(5),
            ..note("z", 0)
        };
        state.insert_confirmed(NoteEntry::from(older));
        assert_eq!(texts(&state), vec!["y", "x", "z"]);
    }
}
