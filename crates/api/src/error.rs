//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use workflow::WorkflowError;

/// API-level error type that maps to HTTP responses.
///
/// One variant per class of the error taxonomy: validation,
/// authentication, authorization, not-found, upstream integration,
/// and persistence/internal.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed required field; nothing was persisted.
    Validation(String),
    /// Missing, invalid, or expired bearer token.
    Unauthorized(String),
    /// Authenticated caller is not the resource owner or lacks a role.
    Forbidden(String),
    /// Referenced resource does not exist.
    NotFound(String),
    /// A payment or shipping provider call failed and could not be
    /// downgraded.
    Upstream(String),
    /// Store failure or other internal error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Upstream(msg) => {
                tracing::warn!(error = %msg, "upstream integration failure");
                (StatusCode::BAD_GATEWAY, msg)
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "message": message });
        (status, axum::Json(body)).into_response()
    }
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        match &err {
            WorkflowError::Validation(_) => ApiError::Validation(err.to_string()),
            WorkflowError::Forbidden(_) => ApiError::Forbidden(err.to_string()),
            WorkflowError::OrderNotFound(_)
            | WorkflowError::NoShipment(_)
            | WorkflowError::UserNotFound(_)
            | WorkflowError::ProductNotFound(_) => ApiError::NotFound(err.to_string()),
            WorkflowError::Shipping(_) | WorkflowError::Payment(_) => {
                ApiError::Upstream(err.to_string())
            }
            WorkflowError::Store(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<store::StoreError> for ApiError {
    fn from(err: store::StoreError) -> Self {
        match &err {
            store::StoreError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            _ => ApiError::Internal(err.to_string()),
        }
    }
}
