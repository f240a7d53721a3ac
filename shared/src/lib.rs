//! Shared types for the wellness dashboard backend
//!
//! Entity models, the unified error system and small utilities used by both
//! the analytics engine and the HTTP server.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
