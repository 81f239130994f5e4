//! API error types with IntoResponse
//!
//! Every failure is rendered as `{"error": "<message>"}`. Storage errors
//! behind a 500 are logged, never echoed.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::StoreError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad path id or body (400)
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Get-by-id found nothing (404)
    #[error("Todo not found")]
    NotFound,

    /// No route for this method and path (404)
    #[error("Route {method}:{path} not found")]
    RouteNotFound { method: String, path: String },

    /// List, get or create failed in storage (500, logged)
    #[error("Something went wrong")]
    Internal(#[source] StoreError),

    /// Delete failed, including a missing row (500, logged)
    #[error("Todo not found or could not be deleted")]
    DeleteFailed(#[source] StoreError),

    /// Update failed, including a missing row (500, logged)
    #[error("Todo not found or could not be updated")]
    UpdateFailed(#[source] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound | Self::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal(_) | Self::DeleteFailed(_) | Self::UpdateFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal(e) | Self::DeleteFailed(e) | Self::UpdateFailed(e) => {
                if e.is_not_found() {
                    tracing::warn!("{}: {}", self, e);
                } else {
                    tracing::error!("{}: {}", self, e);
                }
            }
            Self::Validation(ValidationError::InvalidBody { reason }) => {
                tracing::debug!("Rejected request body: {}", reason);
            }
            _ => {}
        }

        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { .. } => Self::NotFound,
            _ => Self::Internal(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let (status, body) = body_of(ValidationError::InvalidId.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid ID"}));
    }

    #[tokio::test]
    async fn store_not_found_is_404() {
        let (status, body) = body_of(StoreError::NotFound { id: 9 }.into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Todo not found"}));
    }

    #[tokio::test]
    async fn other_store_errors_are_generic_500() {
        let err = ApiError::from(StoreError::Storage("disk on fire".into()));
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Something went wrong"}));
    }

    #[tokio::test]
    async fn delete_and_update_failures_keep_their_messages() {
        let (status, body) = body_of(ApiError::DeleteFailed(StoreError::NotFound { id: 1 })).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Todo not found or could not be deleted"}));

        let (status, body) = body_of(ApiError::UpdateFailed(StoreError::NotFound { id: 1 })).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Todo not found or could not be updated"}));
    }

    #[tokio::test]
    async fn route_not_found_names_method_and_path() {
        let err = ApiError::RouteNotFound {
            method: "GET".into(),
            path: "/nope".into(),
        };
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Route GET:/nope not found"}));
    }
}
