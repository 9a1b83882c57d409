//! Product
//!
//! Inventory line item and the inputs that create or edit it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{DomainError, Price};

/// Quantity strictly above this is considered well stocked.
pub const LOW_STOCK_THRESHOLD: u32 = 50;

/// Stock status derived from the quantity on hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub const ALL: [StockStatus; 3] = [Self::InStock, Self::LowStock, Self::OutOfStock];

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "in-stock",
            StockStatus::LowStock => "low-stock",
            StockStatus::OutOfStock => "out-of-stock",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in-stock" => Ok(StockStatus::InStock),
            "low-stock" => Ok(StockStatus::LowStock),
            "out-of-stock" => Ok(StockStatus::OutOfStock),
            other => Err(DomainError::InvalidStatus(other.to_string())),
        }
    }
}

/// Classify a quantity: `> 50` in stock, `1..=50` low, `0` out.
pub fn stock_status_for(quantity: u32) -> StockStatus {
    if quantity > LOW_STOCK_THRESHOLD {
        StockStatus::InStock
    } else if quantity > 0 {
        StockStatus::LowStock
    } else {
        StockStatus::OutOfStock
    }
}

/// Unit of measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Unit {
    /// Weight
    #[default]
    #[serde(rename = "kg")]
    Kilograms,
    /// Volume
    #[serde(rename = "L")]
    Liters,
    /// Count
    #[serde(rename = "units")]
    Units,
    /// Container
    #[serde(rename = "boxes")]
    Boxes,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Kilograms => "kg",
            Unit::Liters => "L",
            Unit::Units => "units",
            Unit::Boxes => "boxes",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inventory line item.
///
/// Stock status is not stored: [`Product::status`] derives it from
/// `quantity` every time, so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: Price,
    pub quantity: u32,
    pub unit: Unit,
    pub supplier: String,
    pub last_updated: NaiveDate,
}

impl Product {
    /// Build a product from a validated creation input.
    pub fn create(
        id: impl Into<String>,
        input: CreateProductInput,
        today: NaiveDate,
    ) -> Result<Self, DomainError> {
        input.validate()?;

        Ok(Self {
            id: id.into(),
            name: input.name.trim().to_string(),
            category: input.category.trim().to_string(),
            price: input.price,
            quantity: input.quantity,
            unit: input.unit,
            supplier: input.supplier.trim().to_string(),
            last_updated: today,
        })
    }

    pub fn status(&self) -> StockStatus {
        stock_status_for(self.quantity)
    }

    /// Stock value on hand (price × quantity), saturating at `Decimal::MAX`.
    pub fn value(&self) -> Decimal {
        self.price * self.quantity
    }

    /// Apply an edit and stamp `last_updated`.
    ///
    /// The edit is validated against the merged record before anything is
    /// written, so a rejected edit leaves the product untouched.
    pub fn apply_update(
        &mut self,
        input: UpdateProductInput,
        today: NaiveDate,
    ) -> Result<(), DomainError> {
        input.require_changes()?;

        let mut next = self.clone();
        if let Some(name) = input.name {
            next.name = name.trim().to_string();
        }
        if let Some(category) = input.category {
            next.category = category.trim().to_string();
        }
        if let Some(price) = input.price {
            next.price = price;
        }
        if let Some(quantity) = input.quantity {
            next.quantity = quantity;
        }
        if let Some(unit) = input.unit {
            next.unit = unit;
        }
        if let Some(supplier) = input.supplier {
            next.supplier = supplier.trim().to_string();
        }

        require_text("name", &next.name)?;
        require_text("category", &next.category)?;
        require_text("supplier", &next.supplier)?;

        next.last_updated = today;
        *self = next;
        Ok(())
    }
}

/// Input for the add-product action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    pub category: String,
    pub price: Price,
    pub quantity: u32,
    #[serde(default)]
    pub unit: Unit,
    pub supplier: String,
}

impl CreateProductInput {
    /// Required-field checks (the only validation this catalog performs).
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("name", &self.name)?;
        require_text("category", &self.category)?;
        require_text("supplier", &self.supplier)?;
        Ok(())
    }
}

/// Input for the edit-product action. Absent fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProductInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
}

impl UpdateProductInput {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
            && self.unit.is_none()
            && self.supplier.is_none()
    }

    /// An edit must change at least one field.
    pub fn require_changes(&self) -> Result<(), DomainError> {
        if self.is_empty() {
            return Err(DomainError::InvalidProduct("No changes provided".to_string()));
        }
        Ok(())
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

fn require_text(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::InvalidProduct(format!("{field} is required")));
    }
    Ok(())
}
