//! Catalog Errors

use crate::domain::DomainError;
use crate::graphql::GraphQlError;

/// Errors that can occur while reading or writing the catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Rule violation or missing product
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Remote backend failure
    #[error("Catalog backend error: {0}")]
    Remote(#[from] GraphQlError),
}

impl CatalogError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::Domain(DomainError::ProductNotFound(id.into()))
    }
}
