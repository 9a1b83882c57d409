//! Sample inventory used to seed the in-memory catalog.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::{Price, Product, Unit};

struct Seed {
    id: &'static str,
    name: &'static str,
    category: &'static str,
    cents: i64,
    quantity: u32,
    unit: Unit,
    supplier: &'static str,
    day: u32,
}

const SEEDS: [Seed; 10] = [
    Seed { id: "1", name: "Premium Coffee Beans", category: "Beverages", cents: 2499, quantity: 150, unit: Unit::Kilograms, supplier: "Global Coffee Co.", day: 10 },
    Seed { id: "2", name: "Organic Green Tea", category: "Beverages", cents: 1850, quantity: 45, unit: Unit::Kilograms, supplier: "TeaWorld", day: 12 },
    Seed { id: "3", name: "Whole Wheat Flour", category: "Grains", cents: 1275, quantity: 0, unit: Unit::Kilograms, supplier: "Grain Masters", day: 8 },
    Seed { id: "4", name: "Raw Sugar", category: "Sweeteners", cents: 899, quantity: 200, unit: Unit::Kilograms, supplier: "Sweet Supply Inc.", day: 13 },
    Seed { id: "5", name: "Extra Virgin Olive Oil", category: "Oils", cents: 3500, quantity: 80, unit: Unit::Liters, supplier: "Mediterranean Imports", day: 11 },
    Seed { id: "6", name: "Himalayan Pink Salt", category: "Seasonings", cents: 1525, quantity: 25, unit: Unit::Kilograms, supplier: "Salt & Spice Co.", day: 9 },
    Seed { id: "7", name: "Cocoa Powder", category: "Baking", cents: 2250, quantity: 110, unit: Unit::Kilograms, supplier: "Choco World", day: 12 },
    Seed { id: "8", name: "Vanilla Extract", category: "Flavoring", cents: 4500, quantity: 15, unit: Unit::Liters, supplier: "Vanilla Dreams", day: 10 },
    Seed { id: "9", name: "Basmati Rice", category: "Grains", cents: 1699, quantity: 180, unit: Unit::Kilograms, supplier: "Rice Kingdom", day: 13 },
    Seed { id: "10", name: "Honey (Pure)", category: "Sweeteners", cents: 2800, quantity: 60, unit: Unit::Kilograms, supplier: "Bee Natural", day: 11 },
];

/// The ten-product demo inventory (all dated February 2024).
pub fn sample_products() -> Vec<Product> {
    SEEDS
        .iter()
        .map(|seed| Product {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            category: seed.category.to_string(),
            price: Price::new(Decimal::new(seed.cents, 2)).unwrap_or_else(|_| Price::zero()),
            quantity: seed.quantity,
            unit: seed.unit,
            supplier: seed.supplier.to_string(),
            last_updated: NaiveDate::from_ymd_opt(2024, 2, seed.day).unwrap_or_default(),
        })
        .collect()
}
