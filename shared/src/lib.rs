//! Shared types for the POS sync backend
//!
//! Common types used by the sync server and its clients: the JSON response
//! envelope, the error taxonomy, and the open record type synchronized records
//! travel in.

pub mod error;
pub mod record;
pub mod util;

// Re-exports
pub use axum::Json;
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode, ResponseStatus};
pub use http;
pub use record::Record;
pub use serde::{Deserialize, Serialize};
