//! Unified error system for the sync backend
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for every failure the HTTP surface reports
//! - [`ErrorCategory`]: Classification of errors by code range
//! - [`AppError`]: Error type carrying a code, a message, and the underlying error text
//! - [`ApiResponse`]: The `{ status, message, data?, error? }` response envelope
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors (bad request, not found)
//! - 1xxx: Authentication errors (API key)
//! - 9xxx: System errors (store failures)
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::not_found("Order X");
//! assert_eq!(err.code, ErrorCode::NotFound);
//!
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.message, "Order X not found");
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult, ResponseStatus};
