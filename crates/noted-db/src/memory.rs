//! Transient in-memory note store.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use noted_core::{Error, ListNotesRequest, ListNotesResponse, Note, NoteStore, Result, SortBy, SortOrder};

#[derive(Debug, Default)]
struct Inner {
    /// Notes in creation order.
    notes: Vec<Note>,
    /// Next id to assign. Strictly increasing, never reused after deletion.
    next_id: i64,
}

/// In-memory implementation of `NoteStore`.
///
/// A single reader/writer lock guards the backing sequence: reads are
/// fully concurrent, writes are mutually exclusive with everything else.
/// Lock hold time is bounded to the in-memory scan/copy and never spans
/// an `.await`. All returned notes are defensive copies.
#[derive(Debug)]
pub struct MemoryNoteStore {
    inner: RwLock<Inner>,
}

impl MemoryNoteStore {
    /// Create an empty store. The first assigned id is 1.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                notes: Vec::new(),
                next_id: 1,
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| Error::Internal("note store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| Error::Internal("note store lock poisoned".to_string()))
    }
}

impl Default for MemoryNoteStore {
    fn default() -> Self {
        Self::new()
    }
}

fn sort_notes(notes: &mut [Note], sort_by: SortBy, sort_order: SortOrder) {
    notes.sort_by(|a, b| {
        let ord = match sort_by {
            SortBy::CreatedAt => a.created_at.cmp(&b.created_at),
            SortBy::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            SortBy::Title => a.title.cmp(&b.title),
        };
        match sort_order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn list(&self) -> Result<Vec<Note>> {
        let inner = self.read()?;
        let mut notes: Vec<Note> = inner.notes.to_vec();
        sort_notes(&mut notes, SortBy::CreatedAt, SortOrder::Desc);
        Ok(notes)
    }

    async fn list_page(&self, req: ListNotesRequest) -> Result<ListNotesResponse> {
        let limit = req.limit.clamp(1, 100);
        let offset = req.offset();
        let query = req.query.trim();

        let inner = self.read()?;
        // Case-sensitive substring containment, same policy as the
        // durable variant's LIKE filter.
        let mut matching: Vec<Note> = inner
            .notes
            .iter()
            .filter(|n| query.is_empty() || n.title.contains(query) || n.content.contains(query))
            .cloned()
            .collect();
        drop(inner);

        let total = matching.len() as i64;
        sort_notes(&mut matching, req.sort_by, req.sort_order);

        let notes = matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();

        Ok(ListNotesResponse { notes, total })
    }

    async fn get(&self, id: i64) -> Result<Note> {
        let inner = self.read()?;
        inner
            .notes
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or(Error::NoteNotFound(id))
    }

    async fn create(&self, title: &str, content: &str) -> Result<Note> {
        let mut inner = self.write()?;
        let now = Utc::now();
        let note = Note {
            id: inner.next_id,
            title: title.to_string(),
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        };
        inner.next_id += 1;
        inner.notes.push(note.clone());
        Ok(note)
    }

    async fn update(&self, id: i64, title: &str, content: &str) -> Result<Note> {
        let mut inner = self.write()?;
        let note = inner
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(Error::NoteNotFound(id))?;

        // The clock may not advance between two updates; bump by a
        // nanosecond so updated_at stays strictly increasing.
        let now = Utc::now();
        let floor = note.updated_at + Duration::nanoseconds(1);
        note.updated_at = now.max(floor);
        note.title = title.to_string();
        note.content = content.to_string();
        Ok(note.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut inner = self.write()?;
        let pos = inner
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or(Error::NoteNotFound(id))?;
        inner.notes.remove(pos);
        Ok(())
    }
}
