//! Error codes shared by every service, and their HTTP rendering.
//!
//! DESIGN
//! ======
//! Services return their own `thiserror` enums. Each enum implements
//! [`ErrorCode`] so the route layer can render a uniform body:
//!
//! ```json
//! { "code": "E_NO_FILE_SELECTED", "message": "...", "retryable": false }
//! ```
//!
//! Status mapping stays in the route modules, next to the handlers that
//! know which failures are the caller's fault.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Grepable error identity for service errors.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

/// JSON error body returned by every API route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub retryable: bool,
}

/// An error ready to be sent to the client.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    /// Build an API error from any service error and the status the route chose.
    pub fn from_err(status: StatusCode, err: &(impl ErrorCode + ?Sized)) -> Self {
        Self {
            status,
            body: ErrorBody {
                code: err.error_code().to_string(),
                message: err.to_string(),
                retryable: err.retryable(),
            },
        }
    }

    /// Request-shape failures that never reach a service (bad path segment, bad form).
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody { code: "E_BAD_REQUEST".into(), message: message.into(), retryable: false },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(code = %self.body.code, message = %self.body.message, "request failed");
        } else {
            tracing::debug!(code = %self.body.code, message = %self.body.message, "request rejected");
        }
        (self.status, Json(self.body)).into_response()
    }
}

/// Result alias for route handlers.
pub type ApiResult<T> = Result<Json<T>, ApiError>;

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
