//! The persistence capability for notes.
//!
//! `NoteStore` is the seam between the service layer and storage. Two
//! implementations exist in `noted-db`: a transient in-memory store and a
//! durable PostgreSQL store. The rest of the system never special-cases
//! which variant is active; selection happens once at process wiring.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ListNotesRequest, ListNotesResponse, Note};

/// Store for note CRUD operations.
///
/// Notes are created, mutated, and removed only through this trait; no
/// entity exists outside the store's authority. All methods return clones,
/// never references aliasing internal state.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// All notes, ordered by creation time descending, no pagination.
    async fn list(&self) -> Result<Vec<Note>>;

    /// A bounded page of notes with optional substring filtering and
    /// whitelisted sorting. An offset past the end yields an empty page
    /// with the correct total, never an error.
    async fn list_page(&self, req: ListNotesRequest) -> Result<ListNotesResponse>;

    /// Fetch one note. Fails with `Error::NoteNotFound` when absent.
    async fn get(&self, id: i64) -> Result<Note>;

    /// Create a note, assigning the next id and a single timestamp for
    /// both `created_at` and `updated_at`.
    async fn create(&self, title: &str, content: &str) -> Result<Note>;

    /// Replace title and content and refresh `updated_at`. A no-op diff
    /// still counts as an update. `id` and `created_at` never change.
    async fn update(&self, id: i64, title: &str, content: &str) -> Result<Note>;

    /// Remove a note. Fails with `Error::NoteNotFound` when absent.
    async fn delete(&self, id: i64) -> Result<()>;
}
