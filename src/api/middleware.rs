//! API Middleware
//!
//! Bearer token authentication and request logging.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use super::AppState;
use crate::auth::TokenSession;
use crate::domain::{OperationContext, User};
use crate::error::AppError;

/// The signed-in caller, resolved from the bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    /// Raw token, kept so logout can revoke it
    pub token: String,
}

// =========================================================================
// Bearer Token Authentication Middleware
// =========================================================================

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Context for one request. The correlation id comes from `X-Correlation-Id`
/// or is freshly generated when that header is absent or malformed.
fn request_context(headers: &HeaderMap, session: &TokenSession) -> OperationContext {
    let mut context = OperationContext::new()
        .with_user(session.user.id.clone(), session.user.role)
        .with_access_token(session.backend_token.clone());

    if let Some(correlation_id) = headers
        .get("X-Correlation-Id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
    {
        context = context.with_correlation_id(correlation_id);
    }
    context.ensure_correlation_id();
    context
}

/// Resolve `Authorization: Bearer <token>` to a user.
///
/// Missing or unknown tokens get a 401 pointing at the login page.
pub async fn auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let Some(token) = bearer_token(&headers) else {
        return Err(AppError::Unauthenticated.into_response());
    };

    let Some(session) = state.tokens.resolve(token).await else {
        tracing::warn!("Unknown access token");
        return Err(AppError::Unauthenticated.into_response());
    };

    let context = request_context(&headers, &session);

    request.extensions_mut().insert(context);
    request.extensions_mut().insert(AuthenticatedUser {
        user: session.user,
        token: token.to_string(),
    });

    Ok(next.run(request).await)
}

// =========================================================================
// Header masking
// =========================================================================

/// Headers that should be masked in logs
const SENSITIVE_HEADERS: &[&str] = &["authorization", "cookie", "set-cookie"];

/// Mask sensitive headers for logging
pub fn mask_headers_for_logging(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let masked_value = if SENSITIVE_HEADERS.contains(&name.as_str()) {
                "[REDACTED]".to_string()
            } else {
                value.to_str().unwrap_or("[invalid utf8]").to_string()
            };
            (name.to_string(), masked_value)
        })
        .collect()
}

// =========================================================================
// Request Logging Middleware
// =========================================================================

/// Request logging middleware
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let headers = mask_headers_for_logging(request.headers());

    // Runs before auth, so only the header is available here
    let correlation_id = request
        .headers()
        .get("X-Correlation-Id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let start = std::time::Instant::now();

    tracing::info!(
        method = %method,
        uri = %uri,
        correlation_id = ?correlation_id,
        headers = ?headers,
        "Incoming request"
    );

    let response = next.run(request).await;

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = %start.elapsed().as_millis(),
        correlation_id = ?correlation_id,
        "Request completed"
    );

    response
}
