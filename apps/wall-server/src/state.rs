//! Application state - shared across all handlers.

use std::sync::Arc;

use wall_core::Wall;
use wall_core::ports::PostStore;
use wall_infra::InMemoryPostStore;

#[cfg(feature = "rest")]
use wall_infra::RestPostStore;

use crate::config::{AppConfig, Profile};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub wall: Arc<Wall>,
    pub profile: Arc<Profile>,
    pub max_image_bytes: usize,
}

impl AppState {
    /// Build the application state with the configured store.
    pub fn new(config: &AppConfig) -> Self {
        let store = Self::store(config);
        tracing::info!("Application state initialized");
        Self::with_store(store, config.profile.clone(), config.max_image_bytes)
    }

    pub fn with_store(store: Arc<dyn PostStore>, profile: Profile, max_image_bytes: usize) -> Self {
        Self {
            wall: Arc::new(Wall::new(store)),
            profile: Arc::new(profile),
            max_image_bytes,
        }
    }

    #[cfg(feature = "rest")]
    fn store(config: &AppConfig) -> Arc<dyn PostStore> {
        let Some(store_config) = &config.store else {
            tracing::warn!("STORE_URL not set. Running without hosted store (in-memory mode).");
            return Arc::new(InMemoryPostStore::new());
        };

        match RestPostStore::new(store_config) {
            Ok(store) => {
                tracing::info!(
                    url = %store_config.url,
                    table = %store_config.table,
                    "Hosted store configured"
                );
                Arc::new(store)
            }
            Err(e) => {
                tracing::error!(
                    "Failed to build store client: {}. Using in-memory fallback.",
                    e
                );
                Arc::new(InMemoryPostStore::new())
            }
        }
    }

    #[cfg(not(feature = "rest"))]
    fn store(_config: &AppConfig) -> Arc<dyn PostStore> {
        tracing::info!("Running without rest feature - using in-memory store");
        Arc::new(InMemoryPostStore::new())
    }
}
