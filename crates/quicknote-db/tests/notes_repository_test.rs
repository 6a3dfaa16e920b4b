//! PostgreSQL integration tests for PgNoteRepository.
//!
//! These need a reachable database (`DATABASE_URL`, or the default test URL in
//! `quicknote_db::test_fixtures`). They are ignored by default; run them with
//! `cargo test -p quicknote-db -- --ignored`.

use std::collections::HashSet;

use quicknote_core::NoteRepository;
use quicknote_db::test_fixtures::TestDatabase;
use uuid::Uuid;

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_create_then_list_contains_note_once() {
    let _ = dotenvy::dotenv();
    let db = TestDatabase::new().await;

    let before: HashSet<Uuid> = db.notes.list().await.unwrap().iter().map(|n| n.id).collect();
    let note = db.notes.insert("Buy milk").await.unwrap();
    assert!(!before.contains(&note.id));

    let notes = db.notes.list().await.unwrap();
    let matching: Vec<_> = notes.iter().filter(|n| n.text == "Buy milk").collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].id, note.id);

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_list_returns_creation_order() {
    let _ = dotenvy::dotenv();
    let db = TestDatabase::new().await;

    for text in ["T1", "T2", "T3"] {
        db.notes.insert(text).await.unwrap();
    }
    let texts: Vec<_> = db
        .notes
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.text)
        .collect();
    assert_eq!(texts, vec!["T1", "T2", "T3"]);

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_delete_is_idempotent() {
    let _ = dotenvy::dotenv();
    let db = TestDatabase::new().await;

    let note = db.notes.insert("temporary").await.unwrap();
    assert!(db.notes.exists(note.id).await.unwrap());

    assert!(db.notes.delete(note.id).await.unwrap());
    assert!(!db.notes.delete(note.id).await.unwrap());
    assert!(!db.notes.exists(note.id).await.unwrap());

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_delete_missing_leaves_list_unchanged() {
    let _ = dotenvy::dotenv();
    let db = TestDatabase::new().await;

    db.notes.insert("stays").await.unwrap();
    let before = db.notes.list().await.unwrap();
    assert!(!db.notes.delete(Uuid::new_v4()).await.unwrap());
    assert_eq!(db.notes.list().await.unwrap(), before);

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_concurrent_deletes_of_same_id_both_succeed() {
    let _ = dotenvy::dotenv();
    let db = TestDatabase::new().await;

    let note = db.notes.insert("raced").await.unwrap();
    let (a, b) = futures::join!(db.notes.delete(note.id), db.notes.delete(note.id));
    let outcomes = [a.unwrap(), b.unwrap()];
    assert_eq!(outcomes.iter().filter(|d| **d).count(), 1);

    db.cleanup().await;
}
