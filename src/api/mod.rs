//! API module
//!
//! HTTP API endpoints and middleware.

pub mod middleware;
pub mod routes;

pub use routes::{create_public_router, create_router};

use std::sync::Arc;

use crate::auth::{Authenticator, CredentialStore, TokenRegistry};
use crate::catalog::{CatalogRepository, InMemoryCatalog};

/// Shared handles every handler can reach.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogRepository>,
    pub authenticator: Arc<dyn Authenticator>,
    pub tokens: Arc<TokenRegistry>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogRepository>, authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            catalog,
            authenticator,
            tokens: Arc::new(TokenRegistry::new()),
        }
    }

    /// Sample inventory with the demo accounts.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryCatalog::with_sample_data()),
            Arc::new(CredentialStore::demo()),
        )
    }
}
