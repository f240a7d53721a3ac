//! Unified error codes for the dashboard backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Analytics query errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the dashboard client can
/// branch on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,

    // ==================== 1xxx: Analytics ====================
    /// Date range end precedes its start
    InvalidDateRange = 1001,
    /// Unknown time range preset
    InvalidTimeRange = 1002,
    /// Cohort window outside the supported bounds
    InvalidCohortWindow = 1003,
    /// Custom range requested without both bounds
    MissingRangeBounds = 1004,

    // ==================== 9xxx: System ====================
    /// Storage backend error
    StorageError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",

            // Analytics
            ErrorCode::InvalidDateRange => "Date range end must not precede its start",
            ErrorCode::InvalidTimeRange => "Unknown time range",
            ErrorCode::InvalidCohortWindow => "Cohort window is out of range",
            ErrorCode::MissingRangeBounds => "Custom range requires both 'from' and 'to'",

            // System
            ErrorCode::StorageError => "Storage error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
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
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),

            // Analytics
            1001 => Ok(ErrorCode::InvalidDateRange),
            1002 => Ok(ErrorCode::InvalidTimeRange),
            1003 => Ok(ErrorCode::InvalidCohortWindow),
            1004 => Ok(ErrorCode::MissingRangeBounds),

            // System
            9002 => Ok(ErrorCode::StorageError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
