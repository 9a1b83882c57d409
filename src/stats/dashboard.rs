//! Manager dashboard summary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{compute_aggregate_stats, compute_category_stats, top_categories};
use super::{AggregateStats, CategoryStats};
use crate::domain::Product;

/// Number of categories shown in the dashboard ranking.
pub const TOP_CATEGORY_LIMIT: usize = 5;

/// Everything the dashboard shows, computed in one call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub stats: AggregateStats,
    pub top_categories: Vec<CategoryStats>,
    /// `None` when the catalog is empty
    pub in_stock_percentage: Option<Decimal>,
    pub needs_restock: u64,
    pub category_count: usize,
}

impl DashboardSummary {
    pub fn from_products(products: &[Product]) -> Self {
        let stats = compute_aggregate_stats(products);
        let categories = compute_category_stats(products);
        let category_count = categories.len();

        Self {
            in_stock_percentage: stats.in_stock_percentage(),
            needs_restock: stats.low_stock,
            top_categories: top_categories(categories, TOP_CATEGORY_LIMIT),
            category_count,
            stats,
        }
    }
}
