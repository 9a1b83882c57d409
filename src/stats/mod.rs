//! Stock Statistics
//!
//! Read-side rollups over the product catalog: status bucket counts,
//! inventory value and per-category totals. Everything here is a pure
//! function of a product slice and never mutates its input.

mod dashboard;

pub use dashboard::{DashboardSummary, TOP_CATEGORY_LIMIT};

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::{Product, StockStatus};

/// Summary counters over the whole catalog.
///
/// `in_stock + low_stock + out_of_stock == total_products` always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    pub total_products: u64,
    pub in_stock: u64,
    pub low_stock: u64,
    pub out_of_stock: u64,
    pub total_value: Decimal,
    pub total_quantity: u64,
}

impl AggregateStats {
    /// Whole percent of products that are in stock.
    ///
    /// `None` for an empty catalog.
    pub fn in_stock_percentage(&self) -> Option<Decimal> {
        if self.total_products == 0 {
            return None;
        }
        let ratio = Decimal::from(self.in_stock) * Decimal::ONE_HUNDRED
            / Decimal::from(self.total_products);
        // Half rounds up, like the dashboard's whole-percent display
        Some(ratio.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
    }

    pub fn count_for(&self, status: StockStatus) -> u64 {
        match status {
            StockStatus::InStock => self.in_stock,
            StockStatus::LowStock => self.low_stock,
            StockStatus::OutOfStock => self.out_of_stock,
        }
    }
}

/// Count and value of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub name: String,
    pub count: u64,
    pub value: Decimal,
}

/// Single pass over the catalog.
pub fn compute_aggregate_stats(products: &[Product]) -> AggregateStats {
    products
        .iter()
        .fold(AggregateStats::default(), |mut stats, product| {
            stats.total_products += 1;
            match product.status() {
                StockStatus::InStock => stats.in_stock += 1,
                StockStatus::LowStock => stats.low_stock += 1,
                StockStatus::OutOfStock => stats.out_of_stock += 1,
            }
            stats.total_value = stats.total_value.saturating_add(product.value());
            stats.total_quantity += u64::from(product.quantity);
            stats
        })
}

/// Per-category rollup in first-occurrence order.
///
/// The output is not sorted; use [`top_categories`] for a ranking.
pub fn compute_category_stats(products: &[Product]) -> Vec<CategoryStats> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut categories: Vec<CategoryStats> = Vec::new();

    for product in products {
        let slot = *index.entry(product.category.as_str()).or_insert_with(|| {
            categories.push(CategoryStats {
                name: product.category.clone(),
                count: 0,
                value: Decimal::ZERO,
            });
            categories.len() - 1
        });

        let entry = &mut categories[slot];
        entry.count += 1;
        entry.value = entry.value.saturating_add(product.value());
    }

    categories
}

/// Highest-value categories first, at most `limit` of them.
///
/// The sort is stable, so equal values keep first-occurrence order.
pub fn top_categories(mut categories: Vec<CategoryStats>, limit: usize) -> Vec<CategoryStats> {
    categories.sort_by(|a, b| b.value.cmp(&a.value));
    categories.truncate(limit);
    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_products;
    use crate::domain::{Price, Unit};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn product(id: &str, category: &str, price: Decimal, quantity: u32) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            category: category.to_string(),
            price: Price::new(price).unwrap(),
            quantity,
            unit: Unit::Units,
            supplier: "Acme".to_string(),
            last_updated: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_empty_catalog_is_all_zero() {
        let stats = compute_aggregate_stats(&[]);
        assert_eq!(stats, AggregateStats::default());
        assert_eq!(stats.in_stock_percentage(), None);
        assert!(compute_category_stats(&[]).is_empty());
    }

    #[test]
    fn test_sample_catalog_stats() {
        let products = sample_products();
        let stats = compute_aggregate_stats(&products);

        assert_eq!(stats.total_products, 10);
        assert_eq!(stats.in_stock, 6);
        assert_eq!(stats.low_stock, 3);
        assert_eq!(stats.out_of_stock, 1);
        assert_eq!(stats.total_quantity, 865);
        assert_eq!(stats.total_value, dec!(17448.45));
        assert_eq!(stats.in_stock_percentage(), Some(dec!(60)));
    }

    #[test]
    fn test_bucket_counts_sum_to_total() {
        let products: Vec<Product> = (0..120u32)
            .map(|q| product(&q.to_string(), "Bulk", dec!(1.25), q))
            .collect();
        let stats = compute_aggregate_stats(&products);

        let buckets: u64 = StockStatus::ALL.iter().map(|s| stats.count_for(*s)).sum();
        assert_eq!(buckets, stats.total_products);
        assert_eq!(stats.out_of_stock, 1);
        assert_eq!(stats.low_stock, 50);
        assert_eq!(stats.in_stock, 69);
    }

    #[test]
    fn test_total_value_is_sum_of_extended_prices() {
        let products = vec![
            product("1", "A", dec!(2.50), 4),
            product("2", "B", dec!(0.99), 3),
            product("3", "A", dec!(100), 0),
        ];
        let stats = compute_aggregate_stats(&products);
        let expected: Decimal = products.iter().map(|p| p.price.value() * Decimal::from(p.quantity)).sum();
        assert_eq!(stats.total_value, expected);
        assert_eq!(stats.total_value, dec!(12.97));
    }

    #[test]
    fn test_in_stock_percentage_rounds_half_up() {
        let stats = AggregateStats {
            total_products: 8,
            in_stock: 5,
            ..AggregateStats::default()
        };
        assert_eq!(stats.in_stock_percentage(), Some(dec!(63)));

        let stats = AggregateStats {
            total_products: 8,
            in_stock: 1,
            ..AggregateStats::default()
        };
        assert_eq!(stats.in_stock_percentage(), Some(dec!(13)));
    }

    #[test]
    fn test_huge_prices_saturate_instead_of_panicking() {
        let products = vec![
            product("1", "Bulk", Decimal::MAX, 2),
            product("2", "Bulk", Decimal::MAX, 60),
            product("3", "Other", dec!(1), 1),
        ];

        let stats = compute_aggregate_stats(&products);
        assert_eq!(stats.total_value, Decimal::MAX);
        assert_eq!(stats.total_products, 3);

        let categories = compute_category_stats(&products);
        assert_eq!(categories[0].value, Decimal::MAX);
        assert_eq!(categories[1].value, dec!(1));
    }

    #[test]
    fn test_category_order_is_first_occurrence() {
        let products = vec![
            product("1", "A", dec!(1), 1),
            product("2", "B", dec!(1), 1),
            product("3", "A", dec!(1), 1),
            product("4", "C", dec!(1), 1),
        ];
        let names: Vec<String> = compute_category_stats(&products)
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_category_rollup_values() {
        let categories = compute_category_stats(&sample_products());
        assert_eq!(categories.len(), 7);

        let beverages = &categories[0];
        assert_eq!(beverages.name, "Beverages");
        assert_eq!(beverages.count, 2);
        assert_eq!(beverages.value, dec!(4581.00));

        let grains = categories.iter().find(|c| c.name == "Grains").unwrap();
        assert_eq!(grains.count, 2);
        assert_eq!(grains.value, dec!(3058.20));
    }

    #[test]
    fn test_top_categories_sorts_by_value() {
        let top = top_categories(compute_category_stats(&sample_products()), 3);
        let names: Vec<&str> = top.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Beverages", "Sweeteners", "Grains"]);
    }

    #[test]
    fn test_top_categories_ties_keep_first_occurrence() {
        let products = vec![
            product("1", "X", dec!(5), 1),
            product("2", "Y", dec!(10), 1),
            product("3", "Z", dec!(5), 1),
        ];
        let top = top_categories(compute_category_stats(&products), 5);
        let names: Vec<&str> = top.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Y", "X", "Z"]);
    }

    #[test]
    fn test_stats_serialize_camel_case() {
        let json = serde_json::to_value(compute_aggregate_stats(&[])).unwrap();
        assert!(json.get("totalProducts").is_some());
        assert!(json.get("outOfStock").is_some());
    }
}
