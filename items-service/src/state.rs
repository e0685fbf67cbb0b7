//! Application state management

use std::sync::Arc;

use crate::{config::Config, repository::ItemRepository};

/// Application state shared across handlers
///
/// Built once at startup. Cloning is cheap: both fields sit behind `Arc`.
pub struct AppState<R> {
    config: Arc<Config>,
    repository: Arc<R>,
}

// Manual impl: `R` itself need not be `Clone`
impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ItemRepository> AppState<R> {
    /// Create state from configuration and a storage adapter
    pub fn new(config: Config, repository: R) -> Self {
        Self {
            config: Arc::new(config),
            repository: Arc::new(repository),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the storage adapter
    pub fn repository(&self) -> &R {
        &self.repository
    }
}
