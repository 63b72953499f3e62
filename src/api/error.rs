//! HTTP mapping for `TaskError`.
//!
//! Every error is handled at the request boundary and converted to the
//! `{success: false, error, details?}` envelope; nothing propagates past
//! the handler that raised it.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::TaskError;

/// Failure envelope
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            TaskError::Validation(msg) => (StatusCode::BAD_REQUEST, msg, None),
            TaskError::AuthRequired(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            TaskError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            TaskError::Internal { context, details } => {
                tracing::error!(context = %context, details = %details, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, context, Some(details))
            }
        };

        let body = ErrorResponse {
            success: false,
            error,
            details,
        };

        (status, Json(body)).into_response()
    }
}
