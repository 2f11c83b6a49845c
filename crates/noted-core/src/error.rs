//! Error types for the noted service.

use thiserror::Error;

/// Result type alias using noted's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Input validation failure for note fields.
///
/// Checks are applied in declaration order; the first failing rule wins.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Title is empty after trimming surrounding whitespace.
    #[error("title is required")]
    TitleRequired,

    /// Title exceeds the maximum length.
    #[error("title must be less than 100 characters")]
    TitleTooLong,

    /// Content exceeds the maximum length.
    #[error("content must be less than 1000 characters")]
    ContentTooLong,
}

/// Core error type for noted operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Note not found
    #[error("note not found: {0}")]
    NoteNotFound(i64),

    /// Input validation failed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Internal(e.to_string())
    }
}
