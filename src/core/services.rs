//! Unified service container for Quarry
//!
//! Provides shared access to all core services.

use crate::core::backend::{LocalBackend, RemoteBackend, SearchBackend};
use crate::core::config::{BackendKind, Config};
use crate::core::error::Result;
use crate::core::search::SearchService;
use crate::core::store::DocumentStore;
use std::sync::Arc;

/// Unified services container
///
/// All adapters use this same struct for service access.
#[derive(Clone)]
pub struct Services {
    /// Search/fetch over the active backend
    pub search: Arc<SearchService>,

    /// In-memory store, present only with the local backend
    pub store: Option<Arc<DocumentStore>>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration
    ///
    /// Loads the data file for the local backend or builds the HTTP
    /// client for the remote one. Fails before any request is served.
    pub fn new(config: Config) -> Result<Self> {
        match config.backend.kind {
            BackendKind::Local => {
                let store = DocumentStore::load(&config.store.data_file)?;
                Ok(Self::with_store(config, store))
            }
            BackendKind::Remote => {
                let backend = RemoteBackend::new(&config.remote, config.search.snippet_chars)?;
                Ok(Self::with_backend(config, Arc::new(backend)))
            }
        }
    }

    /// Create services around an already loaded store
    pub fn with_store(config: Config, store: DocumentStore) -> Self {
        let store = Arc::new(store);
        let backend = Arc::new(LocalBackend::new(
            Arc::clone(&store),
            config.search.snippet_chars,
        ));

        Self {
            search: Arc::new(SearchService::new(backend, config.search.max_query_length)),
            store: Some(store),
            config: Arc::new(config),
        }
    }

    /// Create services around an arbitrary backend
    pub fn with_backend(config: Config, backend: Arc<dyn SearchBackend>) -> Self {
        Self {
            search: Arc::new(SearchService::new(backend, config.search.max_query_length)),
            store: None,
            config: Arc::new(config),
        }
    }

    /// Name of the active backend
    pub fn backend_name(&self) -> &'static str {
        self.search.backend().name()
    }
}
