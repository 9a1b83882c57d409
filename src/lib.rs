//! Slooze inventory library
//!
//! Product catalog, stock statistics, search and role-based access for a
//! commodities inventory. Re-exports modules for integration testing and the
//! server binary.

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod filter;
pub mod graphql;
pub mod stats;

mod error;

use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

pub use api::AppState;
pub use config::Config;
pub use domain::{DomainError, OperationContext, Price, PriceError, Product, StockStatus, User, UserRole};
pub use error::{AppError, AppResult, ErrorResponse};

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    // Axum layers run last-added first: logging -> auth -> handler
    let protected_routes = api::create_router()
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::middleware::auth_middleware,
        ))
        .merge(api::create_public_router())
        .layer(middleware::from_fn(api::middleware::logging_middleware));

    Router::new()
        // Health check (no auth)
        .route("/health", axum::routing::get(health_check))
        .nest("/api/v1", protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
