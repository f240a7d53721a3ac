//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            Self::NotFound => StatusCode::NOT_FOUND,

            Self::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,

            Self::StorageError => StatusCode::INTERNAL_SERVER_ERROR,

            // Malformed requests and analytics query parameters
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
