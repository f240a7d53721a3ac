//! Data models
//!
//! Entity snapshots served to the dashboard client (camelCase JSON) and the
//! validated insert payloads accepted by the store. All IDs are `i64`
//! assigned by the store.

pub mod health;
pub mod lesson;
pub mod metric;
pub mod sale;
pub mod session;
pub mod user;

// Re-exports
pub use health::*;
pub use lesson::*;
pub use metric::*;
pub use sale::*;
pub use session::*;
pub use user::*;
