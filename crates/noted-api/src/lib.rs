//! # noted-api
//!
//! HTTP routing layer for the noted service: maps REST semantics onto the
//! `NoteService` / `NoteStore` contract. The router is state-injected and
//! middleware-free; CORS and trace layers are applied at wiring time in
//! the binary so tests can drive the bare router in-process.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod service;

use axum::extract::FromRef;
use axum::routing::{get, options};
use axum::Router;

use handlers::{
    create_note, delete_note, get_note, healthz, invalid_note_path, item_method_not_allowed,
    list_notes, method_not_allowed, not_found, preflight, update_note,
};

pub use error::ApiError;
pub use extract::ApiJson;
pub use service::NoteService;

/// HTTP-layer configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// When true, bodies without an `application/json` content type are
    /// rejected with `UNSUPPORTED_CONTENT_TYPE`.
    pub strict_content_type: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            strict_content_type: true,
        }
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: NoteService,
    pub config: ApiConfig,
}

impl FromRef<AppState> for ApiConfig {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(
            "/notes",
            get(list_notes)
                .post(create_note)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        // An empty id segment is a malformed item path, not a collection hit
        .route(
            "/notes/",
            options(preflight).fallback(invalid_note_path),
        )
        // Everything under /notes/ is parsed by hand from the wildcard
        // remainder: a single trailing slash still addresses the note,
        // while empty or deeper segments keep their distinct path error.
        // OPTIONS succeeds first so preflights never see path errors.
        .route(
            "/notes/*rest",
            get(get_note)
                .put(update_note)
                .delete(delete_note)
                .options(preflight)
                .fallback(item_method_not_allowed),
        )
        .fallback(not_found)
        .with_state(state)
}
