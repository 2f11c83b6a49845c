//! JSON body extractor with configurable content-type strictness.

use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRef, FromRequest, Request};
use axum::http::header;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::ApiConfig;

/// JSON body extractor.
///
/// Unlike `axum::Json`, the content-type requirement is configuration:
/// strict mode rejects bodies without an `application/json` content type
/// with `UNSUPPORTED_CONTENT_TYPE`, lenient mode skips the check.
/// Rejections map to this crate's stable error codes rather than axum's
/// defaults.
pub struct ApiJson<T>(pub T);

fn has_json_content_type(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim_start().starts_with("application/json"))
        .unwrap_or(false)
}

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
    ApiConfig: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let config = ApiConfig::from_ref(state);
        if config.strict_content_type && !has_json_content_type(&req) {
            return Err(ApiError::UnsupportedContentType);
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ApiError::InvalidRequestBody)?;

        serde_json::from_slice(&bytes)
            .map(ApiJson)
            .map_err(|_| ApiError::InvalidRequestBody)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with_content_type(value: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri("/notes");
        if let Some(value) = value {
            builder = builder.header(header::CONTENT_TYPE, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_json_content_type_detection() {
        assert!(has_json_content_type(&request_with_content_type(Some(
            "application/json"
        ))));
        assert!(has_json_content_type(&request_with_content_type(Some(
            "application/json; charset=utf-8"
        ))));
        assert!(!has_json_content_type(&request_with_content_type(Some(
            "text/plain"
        ))));
        assert!(!has_json_content_type(&request_with_content_type(None)));
    }
}
