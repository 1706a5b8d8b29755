//! Error taxonomy for lab handlers.
//!
//! # Responsibilities
//! - One error type for every handler (`Result<Response, LabError>`)
//! - Map errors to the wire format: JSON `{"error": ...}` bodies,
//!   plaintext for auth failures
//! - Never leak internals on 500

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Error returned by feature handlers and the dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum LabError {
    /// Missing/invalid JSON body or missing required field.
    #[error("{0}")]
    BadRequest(String),

    /// Wrong HTTP method for the endpoint.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Bearer token missing or mismatched.
    #[error("Unauthorized - Sales content requires authentication")]
    Unauthorized,

    /// Unknown sub-resource id.
    #[error("{0}")]
    NotFound(String),

    /// Anything unexpected. The message is logged, never sent to the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LabError {
    pub fn status(&self) -> StatusCode {
        match self {
            LabError::BadRequest(_) => StatusCode::BAD_REQUEST,
            LabError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            LabError::Unauthorized => StatusCode::UNAUTHORIZED,
            LabError::NotFound(_) => StatusCode::NOT_FOUND,
            LabError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for LabError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            // 401s are plaintext with caching disabled, matching the gate contract.
            LabError::Unauthorized => (
                status,
                [
                    (header::CONTENT_TYPE, "text/plain"),
                    (
                        header::CACHE_CONTROL,
                        "no-store, no-cache, must-revalidate, private",
                    ),
                ],
                self.to_string(),
            )
                .into_response(),
            LabError::Internal(detail) => {
                tracing::error!(error = %detail, "handler failed");
                (
                    status,
                    axum::Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
            other => (status, axum::Json(json!({ "error": other.to_string() }))).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_to_taxonomy() {
        assert_eq!(
            LabError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            LabError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(LabError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            LabError::NotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            LabError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_error_hides_detail() {
        let msg = LabError::Internal("db password leaked".into()).to_string();
        assert!(msg.contains("db password"));
        // the IntoResponse body is the generic message; only Display carries detail
    }
}
