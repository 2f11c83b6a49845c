//! Data model and field validation for notes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 100;

/// Maximum content length in characters.
pub const MAX_CONTENT_LEN: usize = 1000;

/// The persisted note entity.
///
/// The store owns the canonical copy of every note; callers only ever
/// receive clones, so mutating a returned `Note` never affects stored state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    /// Positive, unique, assigned by the store on creation, immutable.
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Set once at creation, immutable thereafter.
    pub created_at: DateTime<Utc>,
    /// Set at creation, refreshed on every successful update.
    /// Invariant: `updated_at >= created_at`.
    pub updated_at: DateTime<Utc>,
}

/// Validate note input fields.
///
/// Rules are checked in order, first failure wins:
/// 1. title empty after trimming -> `TitleRequired`
/// 2. title longer than 100 characters -> `TitleTooLong`
/// 3. content longer than 1000 characters -> `ContentTooLong`
///
/// Lengths are counted in Unicode scalar values, not bytes.
pub fn validate_note_input(title: &str, content: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TitleTooLong);
    }
    if content.chars().count() > MAX_CONTENT_LEN {
        return Err(ValidationError::ContentTooLong);
    }
    Ok(())
}

/// Whitelisted sort columns for note listings.
///
/// Sort SQL is derived from this enum only, never from raw client input,
/// which rules out injection through the ORDER BY clause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
}

impl SortBy {
    /// Parse a client-supplied sort field. Unknown values return `None`
    /// so the caller can fall back to the default silently.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "created_at" => Some(Self::CreatedAt),
            "updated_at" => Some(Self::UpdatedAt),
            "title" => Some(Self::Title),
            _ => None,
        }
    }

    /// The SQL column name for this sort field.
    pub fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::Title => "title",
        }
    }
}

/// Whitelisted sort directions for note listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Parse a client-supplied sort direction. Unknown values return `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    /// The SQL keyword for this direction.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Request for a paginated, filtered, sorted note listing.
#[derive(Debug, Clone)]
pub struct ListNotesRequest {
    /// Case-sensitive substring filter against title OR content.
    /// Empty string means no filtering.
    pub query: String,
    /// 1-based page number.
    pub page: i64,
    /// Page size, 1..=100.
    pub limit: i64,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl Default for ListNotesRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
            limit: 100,
            sort_by: SortBy::default(),
            sort_order: SortOrder::default(),
        }
    }
}

impl ListNotesRequest {
    /// Pagination offset: `(page - 1) * limit`, clamped to sane bounds.
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit.clamp(1, 100)
    }
}

/// Response for a paginated note listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListNotesResponse {
    /// The notes on the requested page. Empty when the offset exceeds the
    /// total; that is not an error.
    pub notes: Vec<Note>,
    /// Total number of notes matching the filter, across all pages.
    pub total: i64,
}
