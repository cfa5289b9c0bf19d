//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::AuthMissing => StatusCode::UNAUTHORIZED,
            Self::AuthInvalid => StatusCode::FORBIDDEN,
            Self::StoreFailure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_statuses() {
        assert_eq!(ErrorCode::AuthMissing.http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorCode::AuthInvalid.http_status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_client_error_statuses() {
        assert_eq!(ErrorCode::BadRequest.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::NotFound.http_status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_system_statuses() {
        assert_eq!(
            ErrorCode::StoreFailure.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
