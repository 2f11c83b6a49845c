//! Service layer: validation and orchestration between transport and storage.

use std::sync::Arc;

use noted_core::{
    validate_note_input, ListNotesRequest, ListNotesResponse, Note, NoteStore, Result, SortBy,
    SortOrder,
};

/// Orchestrates validation and store calls.
///
/// Holds an explicit store reference injected at construction; there is no
/// process-wide store singleton. This is also the single layer where "note
/// not found" exists as the typed `Error::NoteNotFound` value the handler
/// maps to a transport status.
#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    /// List notes with pagination and search.
    ///
    /// `sort` and `order` are normalized to their whitelisted values with
    /// silent fallback to the defaults; unknown values are never rejected.
    pub async fn list(
        &self,
        query: &str,
        page: i64,
        limit: i64,
        sort: Option<&str>,
        order: Option<&str>,
    ) -> Result<ListNotesResponse> {
        let sort_by = sort.and_then(SortBy::parse).unwrap_or_default();
        let sort_order = order.and_then(SortOrder::parse).unwrap_or_default();

        self.store
            .list_page(ListNotesRequest {
                query: query.trim().to_string(),
                page,
                limit,
                sort_by,
                sort_order,
            })
            .await
    }

    /// Validate input, then create.
    ///
    /// Title and content are trimmed before validation and before storage,
    /// so stored fields never carry client whitespace.
    pub async fn create(&self, title: &str, content: &str) -> Result<Note> {
        let title = title.trim();
        let content = content.trim();
        validate_note_input(title, content)?;
        self.store.create(title, content).await
    }

    pub async fn get(&self, id: i64) -> Result<Note> {
        self.store.get(id).await
    }

    /// Validate input, then update.
    ///
    /// Validation runs before the existence check: a validation failure on
    /// a nonexistent id reports the validation error, not NotFound.
    pub async fn update(&self, id: i64, title: &str, content: &str) -> Result<Note> {
        let title = title.trim();
        let content = content.trim();
        validate_note_input(title, content)?;
        self.store.update(id, title, content).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.store.delete(id).await
    }
}
