//! Request handlers: parse the HTTP surface into typed service calls and
//! serialize results as JSON.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use noted_core::Note;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::AppState;

/// Default page size when the client does not send `limit`.
pub const DEFAULT_PAGE_LIMIT: i64 = 100;

/// Maximum accepted page size.
pub const MAX_PAGE_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct ListNotesQuery {
    q: Option<String>,
    // Kept as raw strings so malformed values map to the stable
    // INVALID_PAGE / INVALID_LIMIT codes instead of a generic rejection.
    page: Option<String>,
    limit: Option<String>,
    sort: Option<String>,
    order: Option<String>,
}

/// Collection response: one page of notes plus the echoed paging inputs.
#[derive(Debug, Serialize)]
pub struct NotesPage {
    pub data: Vec<Note>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

#[derive(Debug, Deserialize)]
pub struct NoteBody {
    // Missing fields decode as empty strings and fail validation, rather
    // than rejecting the body shape.
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Parse the remainder of an item path into a note id.
///
/// One trailing slash is tolerated, so `/notes/1/` addresses note 1. An
/// empty id segment or any deeper segment is a malformed path; only then
/// is the id itself checked.
fn parse_item_path(rest: &str) -> Result<i64, ApiError> {
    let rest = rest.strip_suffix('/').unwrap_or(rest);
    if rest.is_empty() || rest.contains('/') {
        return Err(ApiError::InvalidNotePath);
    }
    rest.parse::<i64>().map_err(|_| ApiError::InvalidNoteId)
}

pub async fn list_notes(
    State(state): State<AppState>,
    Query(query): Query<ListNotesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = match query.page.as_deref().filter(|s| !s.is_empty()) {
        None => 1,
        Some(raw) => raw
            .parse::<i64>()
            .ok()
            .filter(|p| *p >= 1)
            .ok_or(ApiError::InvalidPage)?,
    };

    let limit = match query.limit.as_deref().filter(|s| !s.is_empty()) {
        None => DEFAULT_PAGE_LIMIT,
        Some(raw) => raw
            .parse::<i64>()
            .ok()
            .filter(|l| (1..=MAX_PAGE_LIMIT).contains(l))
            .ok_or(ApiError::InvalidLimit)?,
    };

    let q = query.q.as_deref().unwrap_or("").trim();
    let resp = state
        .service
        .list(q, page, limit, query.sort.as_deref(), query.order.as_deref())
        .await?;

    Ok(Json(NotesPage {
        data: resp.notes,
        total: resp.total,
        page,
        limit,
    }))
}

pub async fn create_note(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NoteBody>,
) -> Result<impl IntoResponse, ApiError> {
    let note = state.service.create(&body.title, &body.content).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn get_note(
    State(state): State<AppState>,
    Path(rest): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_item_path(&rest)?;
    let note = state.service.get(id).await?;
    Ok(Json(note))
}

pub async fn update_note(
    State(state): State<AppState>,
    Path(rest): Path<String>,
    ApiJson(body): ApiJson<NoteBody>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_item_path(&rest)?;
    let note = state.service.update(id, &body.title, &body.content).await?;
    Ok(Json(note))
}

pub async fn delete_note(
    State(state): State<AppState>,
    Path(rest): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_item_path(&rest)?;
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// CORS preflight passthrough: empty success.
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

pub async fn invalid_note_path() -> ApiError {
    ApiError::InvalidNotePath
}

/// Unsupported method on an item path. Path validation runs first, so a
/// malformed path reports its own error regardless of the method.
pub async fn item_method_not_allowed(Path(rest): Path<String>) -> ApiError {
    match parse_item_path(&rest) {
        Ok(_) => ApiError::MethodNotAllowed,
        Err(err) => err,
    }
}

/// Router fallback for unmatched paths.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": {
                "code": "NOT_FOUND",
                "message": "resource not found",
            }
        })),
    )
}

pub async fn healthz() -> impl IntoResponse {
    "ok"
}
