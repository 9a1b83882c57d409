//! Product Filtering
//!
//! Free-text search and status filtering over the catalog. Each predicate
//! is a standalone function; [`filter_products`] ANDs them and keeps the
//! original relative order.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use crate::domain::{DomainError, Product, StockStatus};

/// Status predicate: a single status, or the `all` sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    #[default]
    All,
    Only(StockStatus),
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_str(),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(StatusFilter::All),
            other => other.parse().map(StatusFilter::Only),
        }
    }
}

impl From<StockStatus> for StatusFilter {
    fn from(status: StockStatus) -> Self {
        StatusFilter::Only(status)
    }
}

impl Serialize for StatusFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StatusFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Filter criteria for listing products.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<StatusFilter>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn is_match_all(&self) -> bool {
        self.search.as_deref().map_or(true, str::is_empty)
            && self.status == StatusFilter::All
            && self.category.as_deref().map_or(true, str::is_empty)
    }

    pub fn matches(&self, product: &Product) -> bool {
        matches_search(product, self.search.as_deref().unwrap_or(""))
            && matches_status(product, self.status)
            && matches_category(product, self.category.as_deref().unwrap_or(""))
    }
}

/// Case-insensitive substring match against name, category or supplier.
///
/// An empty query matches every product.
pub fn matches_search(product: &Product, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    [&product.name, &product.category, &product.supplier]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

pub fn matches_status(product: &Product, status: StatusFilter) -> bool {
    match status {
        StatusFilter::All => true,
        StatusFilter::Only(wanted) => product.status() == wanted,
    }
}

/// Exact category match ignoring case; empty matches every product.
pub fn matches_category(product: &Product, category: &str) -> bool {
    category.is_empty() || product.category.to_lowercase() == category.to_lowercase()
}

/// Stable filter: matching products in their original order.
pub fn filter_products(products: &[Product], filter: &ProductFilter) -> Vec<Product> {
    products
        .iter()
        .filter(|product| filter.matches(product))
        .cloned()
        .collect()
}
