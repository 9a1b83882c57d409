//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::auth::{AccessDecision, AuthError};
use crate::catalog::CatalogError;
use crate::domain::DomainError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Authentication required")]
    Unauthenticated,

    /// Signed in but the role may not use this resource
    #[error("Permission denied")]
    Forbidden { redirect: &'static str },

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    // Backend errors
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl AppError {
    /// Turn a refused gate check into the matching error.
    /// A granted decision has no error and yields `None`.
    pub fn from_decision(decision: AccessDecision) -> Option<Self> {
        match decision {
            AccessDecision::Granted => None,
            AccessDecision::RedirectToLogin => Some(AppError::Unauthenticated),
            AccessDecision::RedirectTo(page) => Some(AppError::Forbidden {
                redirect: page.path(),
            }),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Page the client should navigate to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

type Mapped = (StatusCode, &'static str, Option<String>, Option<&'static str>);

fn map_domain(err: &DomainError) -> Mapped {
    match err {
        DomainError::InvalidProduct(msg) => {
            (StatusCode::BAD_REQUEST, "invalid_product", Some(msg.clone()), None)
        }
        DomainError::InvalidPrice(e) => {
            (StatusCode::BAD_REQUEST, "invalid_price", Some(e.to_string()), None)
        }
        DomainError::InvalidStatus(s) => {
            (StatusCode::BAD_REQUEST, "invalid_status", Some(s.clone()), None)
        }
        DomainError::InvalidRole(r) => {
            (StatusCode::BAD_REQUEST, "invalid_role", Some(r.clone()), None)
        }
        DomainError::ProductNotFound(id) => {
            (StatusCode::NOT_FOUND, "product_not_found", Some(id.clone()), None)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details, redirect): Mapped = match &self {
            // 401 Unauthorized
            AppError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "unauthenticated", None, Some("/login"))
            }

            // 403 Forbidden
            AppError::Forbidden { redirect } => {
                (StatusCode::FORBIDDEN, "forbidden", None, Some(*redirect))
            }

            // 404 Not Found
            AppError::ProductNotFound(id) => {
                (StatusCode::NOT_FOUND, "product_not_found", Some(id.clone()), None)
            }

            AppError::Catalog(CatalogError::Domain(domain_err)) => map_domain(domain_err),
            AppError::Catalog(CatalogError::Remote(e)) => {
                tracing::error!("Catalog backend error: {:?}", e);
                (StatusCode::BAD_GATEWAY, "catalog_backend_error", None, None)
            }

            AppError::Auth(AuthError::InvalidCredentials) => {
                (StatusCode::UNAUTHORIZED, "invalid_credentials", None, None)
            }
            AppError::Auth(e) => {
                tracing::error!("Authentication backend error: {:?}", e);
                (StatusCode::BAD_GATEWAY, "auth_backend_error", None, None)
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
            error_code: error_code.to_string(),
            details,
            redirect: redirect.map(str::to_string),
        };

        (status, Json(body)).into_response()
    }
}
