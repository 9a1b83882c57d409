//! In-memory catalog backend.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{sample_products, CatalogError, CatalogRepository};
use crate::domain::{CreateProductInput, OperationContext, Product, UpdateProductInput};
use crate::filter::{filter_products, ProductFilter};

/// Catalog held in process memory.
///
/// New products get UUID v4 ids, so ids stay unique after deletes.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<Vec<Product>>,
}

impl InMemoryCatalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog seeded with the sample inventory
    pub fn with_sample_data() -> Self {
        Self::from_products(sample_products())
    }

    pub fn from_products(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
        }
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn list(
        &self,
        _ctx: &OperationContext,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, CatalogError> {
        let products = self.products.read().await;
        Ok(filter_products(&products, filter))
    }

    async fn get(&self, _ctx: &OperationContext, id: &str) -> Result<Option<Product>, CatalogError> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn create(
        &self,
        ctx: &OperationContext,
        input: CreateProductInput,
    ) -> Result<Product, CatalogError> {
        let product = Product::create(Uuid::new_v4().to_string(), input, Self::today())?;

        self.products.write().await.push(product.clone());

        tracing::info!(
            product_id = %product.id,
            name = %product.name,
            status = %product.status(),
            user_id = ?ctx.user_id,
            "Product created"
        );

        Ok(product)
    }

    async fn update(
        &self,
        ctx: &OperationContext,
        id: &str,
        input: UpdateProductInput,
    ) -> Result<Product, CatalogError> {
        let mut products = self.products.write().await;
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::not_found(id))?;

        let previous = product.status();
        product.apply_update(input, Self::today())?;

        if previous != product.status() {
            tracing::info!(
                product_id = %id,
                from = %previous,
                to = %product.status(),
                user_id = ?ctx.user_id,
                "Stock status changed"
            );
        } else {
            tracing::debug!(product_id = %id, "Product updated");
        }

        Ok(product.clone())
    }

    async fn delete(&self, ctx: &OperationContext, id: &str) -> Result<bool, CatalogError> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id != id);
        let removed = products.len() < before;

        if removed {
            tracing::info!(product_id = %id, user_id = ?ctx.user_id, "Product deleted");
        }

        Ok(removed)
    }
}
