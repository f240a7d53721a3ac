//! Unified error system for the dashboard backend
//!
//! - [`ErrorCode`]: Standardized error codes
//! - [`ErrorCategory`]: Classification of errors by code range
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Error response body
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Analytics query errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::NotFound);
//!
//! let err = AppError::with_message(ErrorCode::InvalidDateRange, "'to' precedes 'from'")
//!     .with_detail("from", "2024-03-01T00:00:00Z");
//!
//! let response = ApiResponse::error(&err);
//! assert_eq!(response.code, 1001);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
