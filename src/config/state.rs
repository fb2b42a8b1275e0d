// Application state module
// Configuration plus the shared document store, one Arc per process

use crate::store::DocumentStore;

use super::types::Config;

/// Application state shared across all connection tasks
pub struct AppState {
    pub config: Config,
    pub store: DocumentStore,
}

impl AppState {
    pub const fn new(config: Config, store: DocumentStore) -> Self {
        Self { config, store }
    }
}
