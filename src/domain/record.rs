//! Wire shape of a product.
//!
//! Field names follow the product contract shared with the GraphQL
//! backend (`id`, `name`, ..., `status`, `lastUpdated`).

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{DomainError, Price, Product, StockStatus, Unit};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: Price,
    pub quantity: u32,
    pub unit: Unit,
    pub status: StockStatus,
    pub supplier: String,
    pub last_updated: String,
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price,
            quantity: product.quantity,
            unit: product.unit,
            status: product.status(),
            supplier: product.supplier.clone(),
            last_updated: product.last_updated.format("%Y-%m-%d").to_string(),
        }
    }
}

impl From<Product> for ProductRecord {
    fn from(product: Product) -> Self {
        Self::from(&product)
    }
}

impl TryFrom<ProductRecord> for Product {
    type Error = DomainError;

    /// The record's `status` is checked against its quantity; the derived
    /// status is authoritative and a mismatch is only logged.
    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let last_updated = parse_last_updated(&record.last_updated)?;

        let product = Product {
            id: record.id,
            name: record.name,
            category: record.category,
            price: record.price,
            quantity: record.quantity,
            unit: record.unit,
            supplier: record.supplier,
            last_updated,
        };

        if product.status() != record.status {
            tracing::warn!(
                product_id = %product.id,
                quantity = product.quantity,
                reported = %record.status,
                derived = %product.status(),
                "Stock status disagrees with quantity; using derived status"
            );
        }

        Ok(product)
    }
}

/// Accepts a plain date or a full RFC 3339 timestamp.
fn parse_last_updated(raw: &str) -> Result<NaiveDate, DomainError> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|timestamp| timestamp.date_naive())
        .map_err(|_| DomainError::InvalidProduct(format!("invalid lastUpdated: {raw}")))
}
