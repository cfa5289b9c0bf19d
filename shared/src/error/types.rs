//! Error types and the API response envelope

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application error with a structured error code
///
/// This is the error every HTTP handler returns:
/// - `code` decides the HTTP status (see [`ErrorCode::http_status`])
/// - `message` is the human-readable envelope message
/// - `error` optionally carries the underlying error text (store failures)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Underlying error text, rendered as the envelope's `error` field
    pub error: Option<String>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            error: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            error: None,
        }
    }

    /// Attach the underlying error text
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Missing `x-api-key` header (401)
    pub fn auth_missing() -> Self {
        Self::new(ErrorCode::AuthMissing)
    }

    /// `x-api-key` not in the allow-list (403)
    pub fn auth_invalid() -> Self {
        Self::new(ErrorCode::AuthInvalid)
    }

    /// Required header or body field absent (400)
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::BadRequest, msg)
    }

    /// Addressed record absent (404)
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::NotFound, format!("{} not found", resource.into()))
    }

    /// Underlying store call rejected (500); the message includes the store error text
    pub fn store_failure(err: impl Into<String>) -> Self {
        let err = err.into();
        Self::with_message(
            ErrorCode::StoreFailure,
            format!("{}: {}", ErrorCode::StoreFailure.message(), err),
        )
        .with_error(err)
    }
}

/// Result type for handlers
pub type AppResult<T> = Result<T, AppError>;

/// Envelope status discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Unified API response envelope
///
/// ```json
/// { "status": "success", "message": "Order created", "data": { "syncID": "..." } }
/// { "status": "error", "message": "Order X not found" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// `success` or `error`
    pub status: ResponseStatus,
    /// Human-readable message
    pub message: String,
    /// Response payload (present on success)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Underlying error text (present on some failures)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a success response with a message and data
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response from an [`AppError`]
    pub fn error(err: &AppError) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: err.message.clone(),
            data: None,
            error: err.error.clone(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::<()>::error(&self);

        // Log system errors
        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::NotFound);
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Resource not found");
        assert!(err.error.is_none());
    }

    #[test]
    fn test_store_failure_carries_underlying_text() {
        let err = AppError::store_failure("connection reset");
        assert_eq!(err.code, ErrorCode::StoreFailure);
        assert!(err.message.contains("connection reset"));
        assert_eq!(err.error.as_deref(), Some("connection reset"));
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_envelope_shape() {
        let err = AppError::bad_request("subeid header is required");
        let json = serde_json::to_value(ApiResponse::<()>::error(&err)).unwrap();

        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "subeid header is required");
        assert!(json.get("data").is_none());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_success_envelope_shape() {
        let resp = ApiResponse::success("Created", serde_json::json!({ "syncID": "X" }));
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["syncID"], "X");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_auth_constructors() {
        assert_eq!(AppError::auth_missing().http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::auth_invalid().http_status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::not_found("Order X").message, "Order X not found");
    }
}
