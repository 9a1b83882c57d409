//! Price type
//!
//! Domain primitive for unit prices. A price is validated at construction
//! time, so a negative price cannot exist in the catalog.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;
use std::str::FromStr;

/// Price represents a validated unit price.
///
/// # Invariants
/// - Value is never negative (zero is allowed for free samples)
/// - Precision is kept as given; only display rounds to cents
///
/// # Example
/// ```
/// use rust_decimal::Decimal;
/// use slooze_inventory::domain::Price;
///
/// let price = Price::new(Decimal::new(2499, 2)).unwrap();
/// assert_eq!(price.value(), Decimal::new(2499, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

/// Errors that can occur when creating a Price
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceError {
    #[error("Price must not be negative (got {0})")]
    Negative(Decimal),

    #[error("Invalid price format: {0}")]
    ParseError(String),
}

impl Price {
    /// Create a new Price with validation. Trailing zeros are dropped.
    pub fn new(value: Decimal) -> Result<Self, PriceError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(PriceError::Negative(value));
        }
        Ok(Self(value.normalize()))
    }

    /// Zero price
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Value of `quantity` units at this price.
    ///
    /// Saturates at `Decimal::MAX` instead of overflowing.
    pub fn extended(&self, quantity: u32) -> Decimal {
        self.0.saturating_mul(Decimal::from(quantity))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s).map_err(|e| PriceError::ParseError(e.to_string()))?;
        Price::new(decimal)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Price::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Mul<u32> for Price {
    type Output = Decimal;

    fn mul(self, quantity: u32) -> Decimal {
        self.extended(quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_accepts_zero() {
        assert_eq!(Price::new(Decimal::ZERO).unwrap(), Price::zero());
    }

    #[test]
    fn test_price_negative_rejected() {
        let price = Price::new(dec!(-0.01));
        assert!(matches!(price, Err(PriceError::Negative(_))));
    }

    #[test]
    fn test_sub_cent_precision_is_kept() {
        let price = Price::new(dec!(12.999)).unwrap();
        assert_eq!(price.value(), dec!(12.999));
        assert_eq!(price.to_string(), "13.00");

        let float_artifact: Price = serde_json::from_str("0.30000000000000004").unwrap();
        assert!(float_artifact.value() > dec!(0.3));
    }

    #[test]
    fn test_price_trailing_zeros_normalized() {
        let price = Price::new(dec!(12.750)).unwrap();
        assert_eq!(price.value(), dec!(12.75));
        assert_eq!(price.to_string(), "12.75");
    }

    #[test]
    fn test_price_from_str() {
        let price: Price = "24.99".parse().unwrap();
        assert_eq!(price.value(), dec!(24.99));
        assert!(matches!("abc".parse::<Price>(), Err(PriceError::ParseError(_))));
    }

    #[test]
    fn test_extended_value() {
        let price = Price::new(dec!(18.50)).unwrap();
        assert_eq!(price * 45, dec!(832.50));
        assert_eq!(price.extended(0), Decimal::ZERO);
    }

    #[test]
    fn test_extended_value_saturates() {
        let price = Price::new(Decimal::MAX).unwrap();
        assert_eq!(price.extended(2), Decimal::MAX);
        assert_eq!(price * u32::MAX, Decimal::MAX);
    }

    #[test]
    fn test_price_deserializes_from_number_and_string() {
        let from_number: Price = serde_json::from_str("35.0").unwrap();
        let from_string: Price = serde_json::from_str("\"35.00\"").unwrap();
        assert_eq!(from_number, from_string);
        assert!(serde_json::from_str::<Price>("-1").is_err());
    }
}
