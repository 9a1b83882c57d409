//! Product Catalog
//!
//! Data-access seam for products. The backend is picked once at startup:
//! [`InMemoryCatalog`] for local use, [`GraphQlCatalog`] when a GraphQL
//! inventory service is available.

mod error;
mod graphql;
mod memory;
mod sample;

pub use error::CatalogError;
pub use graphql::{GraphQlCatalog, GraphQlClient};
pub use memory::InMemoryCatalog;
pub use sample::sample_products;

use async_trait::async_trait;

use crate::domain::{CreateProductInput, OperationContext, Product, UpdateProductInput};
use crate::filter::ProductFilter;

/// Product store operations.
///
/// Every call carries the caller's [`OperationContext`]; remote stores
/// forward its backend token.
#[async_trait]
pub trait CatalogRepository: Send + Sync + 'static {
    /// Products matching `filter`, in catalog order.
    async fn list(
        &self,
        ctx: &OperationContext,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, CatalogError>;

    /// Look up a single product.
    async fn get(&self, ctx: &OperationContext, id: &str) -> Result<Option<Product>, CatalogError>;

    /// Add a product. The store assigns the id.
    async fn create(
        &self,
        ctx: &OperationContext,
        input: CreateProductInput,
    ) -> Result<Product, CatalogError>;

    /// Edit a product, recomputing status and `last_updated`.
    async fn update(
        &self,
        ctx: &OperationContext,
        id: &str,
        input: UpdateProductInput,
    ) -> Result<Product, CatalogError>;

    /// Remove a product. Returns `false` if it did not exist.
    async fn delete(&self, ctx: &OperationContext, id: &str) -> Result<bool, CatalogError>;

    /// Full catalog, unfiltered.
    async fn all(&self, ctx: &OperationContext) -> Result<Vec<Product>, CatalogError> {
        self.list(ctx, &ProductFilter::default()).await
    }
}
