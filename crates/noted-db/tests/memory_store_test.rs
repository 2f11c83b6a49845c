//! Integration tests for the transient store: pagination math, search
//! filtering, and concurrent-safety.

use std::collections::HashSet;
use std::sync::Arc;

use noted_core::{ListNotesRequest, NoteStore, SortBy, SortOrder};
use noted_db::MemoryNoteStore;

#[tokio::test]
async fn page_past_end_is_empty_with_correct_total() {
    let store = MemoryNoteStore::new();
    for i in 0..7 {
        store.create(&format!("note {i}"), "").await.unwrap();
    }

    let resp = store
        .list_page(ListNotesRequest {
            page: 2,
            limit: 10,
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(resp.notes.is_empty());
    assert_eq!(resp.total, 7);
}

#[tokio::test]
async fn pagination_slices_without_overlap() {
    let store = MemoryNoteStore::new();
    for i in 0..25 {
        store.create(&format!("note {i:02}"), "").await.unwrap();
    }

    let mut seen = HashSet::new();
    for page in 1..=3 {
        let resp = store
            .list_page(ListNotesRequest {
                page,
                limit: 10,
                sort_by: SortBy::Title,
                sort_order: SortOrder::Asc,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(resp.total, 25);
        let expected_len = if page == 3 { 5 } else { 10 };
        assert_eq!(resp.notes.len(), expected_len);
        for note in resp.notes {
            assert!(seen.insert(note.id), "note {} appeared twice", note.id);
        }
    }
    assert_eq!(seen.len(), 25);
}

#[tokio::test]
async fn search_filter_applies_before_pagination() {
    let store = MemoryNoteStore::new();
    for i in 0..5 {
        store.create(&format!("match {i}"), "").await.unwrap();
        store.create(&format!("other {i}"), "").await.unwrap();
    }

    let resp = store
        .list_page(ListNotesRequest {
            query: "match".to_string(),
            page: 1,
            limit: 3,
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(resp.total, 5);
    assert_eq!(resp.notes.len(), 3);
    assert!(resp.notes.iter().all(|n| n.title.starts_with("match")));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_creates_produce_distinct_increasing_ids() {
    let store = Arc::new(MemoryNoteStore::new());
    let n = 64;

    let mut handles = Vec::with_capacity(n);
    for i in 0..n {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.create(&format!("concurrent {i}"), "").await.unwrap().id
        }));
    }

    let mut ids = Vec::with_capacity(n);
    for handle in handles {
        ids.push(handle.await.unwrap());
    }

    let unique: HashSet<i64> = ids.iter().copied().collect();
    assert_eq!(unique.len(), n, "ids must be distinct, no lost writes");

    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(sorted.first(), Some(&1));
    assert_eq!(sorted.last(), Some(&(n as i64)));

    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), n);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_reads_and_writes_stay_consistent() {
    let store = Arc::new(MemoryNoteStore::new());
    for i in 0..10 {
        store.create(&format!("seed {i}"), "").await.unwrap();
    }

    let mut handles = Vec::new();
    for i in 0..20 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            if i % 2 == 0 {
                let _ = store.list().await.unwrap();
            } else {
                let _ = store.create(&format!("writer {i}"), "").await.unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.list().await.unwrap().len(), 20);
}

#[tokio::test]
async fn deleted_note_stays_deleted() {
    let store = MemoryNoteStore::new();
    let note = store.create("ephemeral", "").await.unwrap();

    store.delete(note.id).await.unwrap();
    assert!(store.get(note.id).await.is_err());
    assert!(store.delete(note.id).await.is_err());
}
