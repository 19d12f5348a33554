//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.
//! Store failures are logged where they are converted (inside the handler's
//! span, so the log line carries the operation and user id) and answered
//! with a generic body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Malformed path, query or body (400)
    Validation(ValidationError),

    /// No matching row or route (404)
    NotFound { resource: &'static str, id: String },

    /// Path exists but not for this method (405)
    MethodNotAllowed,

    /// Store failure (500, logged, never echoed)
    Database(DbError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Validation(e) => json!({
                "error": "validation_error",
                "message": e.to_string()
            }),
            Self::NotFound { resource, id } => json!({
                "error": "not_found",
                "message": format!("{} '{}' not found", resource, id)
            }),
            Self::MethodNotAllowed => json!({
                "error": "method_not_allowed",
                "message": "method not allowed for this path"
            }),
            Self::Database(_) => json!({
                "error": "internal_error",
                "message": "an internal error occurred"
            }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::Sqlx(_) => {
                // Log the actual error, return generic message
                tracing::error!(error = %e, "Database error");
                Self::Database(e)
            }
        }
    }
}
