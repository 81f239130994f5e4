//! Custom Axum extractors

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::{parse_int_prefix, ValidationError};

/// Extract and parse a todo id from the path.
///
/// Leading-integer parsing is used, so `/todos/12abc` addresses todo 12
/// and `/todos/abc` is rejected with "Invalid ID".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoId(pub i64);

impl<S> FromRequestParts<S> for TodoId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::InvalidId))?;

        parse_int_prefix(&raw)
            .map(Self)
            .ok_or(ApiError::Validation(ValidationError::InvalidId))
    }
}

/// JSON body extractor with JSON error responses.
///
/// Unlike `axum::Json` the content type is not checked and an empty body
/// decodes as `{}`, so required-field checks run in the handler and
/// produce their own messages.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            ApiError::Validation(ValidationError::InvalidBody {
                reason: e.body_text(),
            })
        })?;

        let raw: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        serde_json::from_slice(raw).map(Self).map_err(|e| {
            ApiError::Validation(ValidationError::InvalidBody {
                reason: e.to_string(),
            })
        })
    }
}
