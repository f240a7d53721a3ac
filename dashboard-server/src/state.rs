//! Handler state

use std::sync::Arc;

use crate::config::Config;
use crate::storage::Storage;

/// Shared by every handler; cheap to clone
#[derive(Clone)]
pub struct AppState {
    /// Backing store, injected at startup
    pub storage: Arc<dyn Storage>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>, config: Config) -> Self {
        Self {
            storage,
            config: Arc::new(config),
        }
    }
}
