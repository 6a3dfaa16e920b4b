//! In-process note store.
//!
//! Keeps notes in insertion order behind a `tokio::sync::RwLock`. Used by the
//! `memory` storage backend and by tests that need a real repository without
//! PostgreSQL.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use quicknote_core::{new_v7, Note, NoteRepository, Result};

/// Note repository backed by a vector in memory.
#[derive(Debug, Default)]
pub struct MemoryNoteRepository {
    notes: RwLock<Vec<Note>>,
}

impl MemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored notes.
    pub async fn len(&self) -> usize {
        self.notes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.notes.read().await.is_empty()
    }
}

#[async_trait]
impl NoteRepository for MemoryNoteRepository {
    async fn insert(&self, text: &str) -> Result<Note> {
        let mut notes = self.notes.write().await;

        // Never let the wall clock step backwards past the newest note.
        let mut created_at = Utc::now();
        if let Some(last) = notes.last() {
            if created_at < last.created_at {
                created_at = last.created_at;
            }
        }

        let note = Note {
            id: new_v7(),
            text: text.to_string(),
            created_at,
        };
        notes.push(note.clone());
        debug!(
            subsystem = "db",
            component = "memory_store",
            op = "insert",
            note_id = %note.id,
            "Note inserted"
        );
        Ok(note)
    }

    async fn list(&self) -> Result<Vec<Note>> {
        Ok(self.notes.read().await.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut notes = self.notes.write().await;
        let before = notes.len();
        notes.retain(|n| n.id != id);
        let deleted = notes.len() < before;
        debug!(
            subsystem = "db",
            component = "memory_store",
            op = "delete",
            note_id = %id,
            deleted,
            "Note delete applied"
        );
        Ok(deleted)
    }

    async fn exists(&self, id: Uuid) -> Result<bool> {
        Ok(self.notes.read().await.iter().any(|n| n.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_insert_assigns_distinct_ids() {
        let repo = MemoryNoteRepository::new();
        let a = repo.insert("first").await.unwrap();
        let b = repo.insert("first").await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let repo = MemoryNoteRepository::new();
        for text in ["T1", "T2", "T3"] {
            repo.insert(text).await.unwrap();
        }
        let texts: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.text)
            .collect();
        assert_eq!(texts, vec!["T1", "T2", "T3"]);
    }

    #[tokio::test]
    async fn test_created_at_is_monotonic() {
        let repo = MemoryNoteRepository::new();
        for i in 0..50 {
            repo.insert(&format!("n{}", i)).await.unwrap();
        }
        let notes = repo.list().await.unwrap();
        assert!(notes
            .windows(2)
            .all(|w| w[0].created_at <= w[1].created_at));
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let repo = MemoryNoteRepository::new();
        let kept = repo.insert("keep").await.unwrap();
        assert!(!repo.delete(Uuid::new_v4()).await.unwrap());
        assert_eq!(repo.list().await.unwrap(), vec![kept]);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let repo = MemoryNoteRepository::new();
        let note = repo.insert("gone").await.unwrap();
        assert!(repo.delete(note.id).await.unwrap());
        assert!(!repo.delete(note.id).await.unwrap());
        assert!(!repo.exists(note.id).await.unwrap());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_all_land() {
        let repo = std::sync::Arc::new(MemoryNoteRepository::new());
        let mut handles = Vec::new();
        for i in 0..20 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.insert(&format!("note {}", i)).await.unwrap().id
            }));
        }
        let mut ids = HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap());
        }
        assert_eq!(ids.len(), 20);
        assert_eq!(repo.len().await, 20);
    }
}
