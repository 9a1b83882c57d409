//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;

use super::PriceError;

/// Catalog rule violations and lookups that found nothing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field is missing or an edit carries no changes
    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    /// Price failed validation
    #[error(transparent)]
    InvalidPrice(#[from] PriceError),

    /// Unknown stock status label
    #[error("Unknown stock status: {0}")]
    InvalidStatus(String),

    /// Unknown role label
    #[error("Unknown role: {0}")]
    InvalidRole(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_price_error_is_transparent() {
        let err: DomainError = PriceError::Negative(Decimal::new(-1, 0)).into();
        assert!(matches!(err, DomainError::InvalidPrice(PriceError::Negative(_))));
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn test_not_found_message() {
        let err = DomainError::ProductNotFound("42".to_string());
        assert_eq!(err.to_string(), "Product not found: 42");
    }
}
