//! Application state - Dependency injection container.
//!
//! Provides handlers with the service container and the storage handle used
//! for health reporting.

use std::sync::Arc;

use crate::infra::Storage;
use crate::services::{ServiceContainer, Services};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Service container
    services: Arc<dyn ServiceContainer>,
    /// Selected storage backend
    pub storage: Storage,
}

impl AppState {
    /// Build state with services wired onto the given storage.
    pub fn from_storage(storage: Storage) -> Self {
        let services = Arc::new(Services::from_storage(&storage));
        Self::new(services, storage)
    }

    /// Create state with a manually injected container, e.g. a mock.
    pub fn new(services: Arc<dyn ServiceContainer>, storage: Storage) -> Self {
        Self { services, storage }
    }

    /// Get the service container
    pub fn services(&self) -> &Arc<dyn ServiceContainer> {
        &self.services
    }
}
