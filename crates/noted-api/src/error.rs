//! API error taxonomy and its mapping onto transport statuses.
//!
//! Every error leaving the HTTP layer carries a stable machine-readable
//! code alongside a human message:
//! `{"error": {"code": "...", "message": "..."}}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use noted_core::ValidationError;

#[derive(Debug)]
pub enum ApiError {
    /// Item path has extra segments or an empty id segment.
    InvalidNotePath,
    /// Id segment is not parseable as an integer.
    InvalidNoteId,
    /// `page` query parameter present but not a positive integer.
    InvalidPage,
    /// `limit` query parameter present but not an integer in 1..=100.
    InvalidLimit,
    /// Body is not valid JSON for the expected shape.
    InvalidRequestBody,
    /// Strict mode is on and the body lacks an `application/json` content type.
    UnsupportedContentType,
    MethodNotAllowed,
    /// Business validation failure surfaced from the service.
    Validation(ValidationError),
    NotFound,
    /// Storage-layer failure not otherwise classified. Logged, reported
    /// generically without leaking internal detail.
    Internal(noted_core::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidNotePath
            | ApiError::InvalidNoteId
            | ApiError::InvalidPage
            | ApiError::InvalidLimit
            | ApiError::InvalidRequestBody
            | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::UnsupportedContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidNotePath => "INVALID_NOTE_PATH",
            ApiError::InvalidNoteId => "INVALID_NOTE_ID",
            ApiError::InvalidPage => "INVALID_PAGE",
            ApiError::InvalidLimit => "INVALID_LIMIT",
            ApiError::InvalidRequestBody => "INVALID_REQUEST_BODY",
            ApiError::UnsupportedContentType => "UNSUPPORTED_CONTENT_TYPE",
            ApiError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::NotFound => "NOT_FOUND",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::InvalidNotePath => "path must be /notes/{id}".to_string(),
            ApiError::InvalidNoteId => "id must be a valid integer".to_string(),
            ApiError::InvalidPage => "page must be a positive integer".to_string(),
            ApiError::InvalidLimit => {
                "limit must be a positive integer between 1 and 100".to_string()
            }
            ApiError::InvalidRequestBody => "invalid request body".to_string(),
            ApiError::UnsupportedContentType => {
                "Content-Type must be application/json".to_string()
            }
            ApiError::MethodNotAllowed => "method not allowed".to_string(),
            ApiError::Validation(err) => err.to_string(),
            ApiError::NotFound => "note not found".to_string(),
            ApiError::Internal(_) => "internal server error".to_string(),
        }
    }
}

impl From<noted_core::Error> for ApiError {
    fn from(err: noted_core::Error) -> Self {
        match err {
            noted_core::Error::NoteNotFound(_) => ApiError::NotFound,
            noted_core::Error::Validation(v) => ApiError::Validation(v),
            other => ApiError::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(err) = &self {
            error!(error = %err, "request failed with internal error");
        }

        let body = Json(serde_json::json!({
            "error": {
                "code": self.code(),
                "message": self.message(),
            }
        }));

        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::InvalidPage.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ApiError::UnsupportedContentType.status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            ApiError::Internal(noted_core::Error::Internal("boom".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_translates_from_core() {
        let err: ApiError = noted_core::Error::NoteNotFound(7).into();
        assert_eq!(err.code(), "NOT_FOUND");
        assert_eq!(err.message(), "note not found");
    }

    #[test]
    fn test_validation_error_carries_rule_message() {
        let err: ApiError = noted_core::Error::Validation(ValidationError::TitleTooLong).into();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(err.message(), "title must be less than 100 characters");
    }

    #[test]
    fn test_internal_error_does_not_leak_detail() {
        let err: ApiError =
            noted_core::Error::Internal("connection refused to 10.0.0.5".into()).into();
        assert_eq!(err.code(), "INTERNAL_ERROR");
        assert_eq!(err.message(), "internal server error");
    }
}
