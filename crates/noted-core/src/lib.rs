//! # noted-core
//!
//! Core types, traits, and validation for the noted service.
//!
//! This crate provides the note entity, its field invariants, the error
//! taxonomy, and the `NoteStore` capability that storage backends implement.

pub mod error;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result, ValidationError};
pub use models::{
    validate_note_input, ListNotesRequest, ListNotesResponse, Note, SortBy, SortOrder,
    MAX_CONTENT_LEN, MAX_TITLE_LEN,
};
pub use traits::NoteStore;
