//! Domain module
//!
//! Core domain types: products, users and request context.

pub mod context;
pub mod error;
pub mod price;
pub mod product;
pub mod record;
pub mod user;

pub use context::OperationContext;
pub use error::DomainError;
pub use price::{Price, PriceError};
pub use product::{
    stock_status_for, CreateProductInput, Product, StockStatus, Unit, UpdateProductInput,
    LOW_STOCK_THRESHOLD,
};
pub use record::ProductRecord;
pub use user::{User, UserRole};
