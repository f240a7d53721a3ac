//! Wellness dashboard backend
//!
//! Serves the raw program collections and the derived analytics pages over
//! HTTP.
//!
//! # Module layout
//!
//! ```text
//! dashboard-server/src/
//! ├── config.rs     # environment configuration
//! ├── logger.rs     # tracing subscriber setup
//! ├── state.rs      # shared handler state
//! ├── storage/      # Storage trait, in-memory store, sample data
//! └── api/          # routes and handlers
//! ```

pub mod api;
pub mod config;
pub mod logger;
pub mod state;
pub mod storage;

pub use config::Config;
pub use state::AppState;
pub use storage::{MemStorage, Storage, StorageError};
