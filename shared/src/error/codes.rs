//! Unified error codes for the sync backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so clients written in any
/// language can switch on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// A required header or body field is absent or malformed
    BadRequest = 2,
    /// The addressed record does not exist
    NotFound = 3,

    // ==================== 1xxx: Auth ====================
    /// No `x-api-key` header on the request
    AuthMissing = 1001,
    /// `x-api-key` is not in the allow-list
    AuthInvalid = 1002,

    // ==================== 9xxx: System ====================
    /// The document store rejected an operation
    StoreFailure = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::BadRequest => "Bad request",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AuthMissing => "API key is missing",
            ErrorCode::AuthInvalid => "API key is invalid",
            ErrorCode::StoreFailure => "Store operation failed",
        }
    }
}

/// Error returned when converting an unknown u16 into [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::BadRequest),
            3 => Ok(ErrorCode::NotFound),
            1001 => Ok(ErrorCode::AuthMissing),
            1002 => Ok(ErrorCode::AuthInvalid),
            9002 => Ok(ErrorCode::StoreFailure),
            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
