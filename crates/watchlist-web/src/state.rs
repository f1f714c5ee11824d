use std::sync::Arc;

use watchlist_config::Config;
use watchlist_sources::{CloudantClient, DocumentStore, MetadataApi, TmdbClient};

use crate::views::Views;

/// Shared application state.
///
/// Built once at startup and handed to every handler; nothing in here is
/// mutated after construction.
#[derive(Clone)]
pub struct AppState {
    pub metadata: Arc<dyn MetadataApi>,
    pub store: Arc<dyn DocumentStore>,
    pub views: Arc<Views>,
}

impl AppState {
    pub fn new(
        metadata: Arc<dyn MetadataApi>,
        store: Arc<dyn DocumentStore>,
        views: Arc<Views>,
    ) -> Self {
        Self {
            metadata,
            store,
            views,
        }
    }

    /// Build the real clients and views from configuration
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let metadata = TmdbClient::from_config(&config.tmdb)?;
        let store = CloudantClient::from_config(&config.database)?;
        let views = Views::new()?;

        Ok(Self::new(Arc::new(metadata), Arc::new(store), Arc::new(views)))
    }
}
