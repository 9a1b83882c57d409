//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::auth::{check_access, landing_page, navigation, Page};
use crate::domain::{
    CreateProductInput, OperationContext, ProductRecord, UpdateProductInput, User, UserRole,
};
use crate::error::{AppError, AppResult};
use crate::filter::ProductFilter;
use crate::stats::{
    compute_aggregate_stats, compute_category_stats, top_categories, AggregateStats,
    CategoryStats, DashboardSummary,
};

use super::middleware::AuthenticatedUser;
use super::AppState;

const MANAGER_ONLY: &[UserRole] = &[UserRole::Manager];

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub user: User,
    /// Where the client should go next
    pub landing_page: &'static str,
}

#[derive(Debug, Serialize)]
pub struct NavigationItem {
    pub path: &'static str,
    pub title: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<ProductRecord>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStatsResponse {
    #[serde(flatten)]
    pub stats: AggregateStats,
    pub in_stock_percentage: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct CategoriesQuery {
    /// Keep only the `top` highest-value categories
    #[serde(default)]
    pub top: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryStats>,
}

// =========================================================================
// API Router
// =========================================================================

/// Routes reachable without a token
pub fn create_public_router() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

/// Routes behind the bearer token middleware
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(me))
        .route("/auth/logout", post(logout))
        .route("/navigation", get(get_navigation))
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/:id",
            get(get_product).patch(update_product).delete(delete_product),
        )
        .route("/stats/products", get(product_stats))
        .route("/stats/categories", get(category_stats))
        .route("/dashboard", get(dashboard))
}

/// Refuse the request unless the caller's role is allowed.
fn require_role(auth: &AuthenticatedUser, allowed_roles: Option<&[UserRole]>) -> AppResult<()> {
    match AppError::from_decision(check_access(Some(&auth.user), allowed_roles)) {
        None => Ok(()),
        Some(err) => {
            tracing::warn!(user_id = %auth.user.id, role = %auth.user.role, "Role not permitted");
            Err(err)
        }
    }
}

// =========================================================================
// Authentication
// =========================================================================

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let outcome = state
        .authenticator
        .authenticate(&req.email, &req.password)
        .await?;

    let access_token = state
        .tokens
        .issue(outcome.user.clone(), outcome.access_token)
        .await;
    let active_sessions = state.tokens.active_sessions().await;
    tracing::info!(
        user_id = %outcome.user.id,
        active_sessions = active_sessions,
        "Access token issued"
    );

    Ok(Json(LoginResponse {
        access_token,
        landing_page: landing_page(outcome.user.role).path(),
        user: outcome.user,
    }))
}

async fn me(Extension(auth): Extension<AuthenticatedUser>) -> Json<User> {
    Json(auth.user)
}

async fn logout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> StatusCode {
    state.tokens.revoke(&auth.token).await;
    tracing::info!(user_id = %auth.user.id, "Logged out");
    StatusCode::NO_CONTENT
}

async fn get_navigation(Extension(auth): Extension<AuthenticatedUser>) -> Json<Vec<NavigationItem>> {
    let items = navigation(&auth.user)
        .into_iter()
        .map(|page| NavigationItem {
            path: page.path(),
            title: page.title(),
        })
        .collect();
    Json(items)
}

// =========================================================================
// Products
// =========================================================================

async fn list_products(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Extension(ctx): Extension<OperationContext>,
    Query(filter): Query<ProductFilter>,
) -> AppResult<Json<ProductsResponse>> {
    require_role(&auth, Page::Products.allowed_roles())?;

    let products: Vec<ProductRecord> = state
        .catalog
        .list(&ctx, &filter)
        .await?
        .into_iter()
        .map(ProductRecord::from)
        .collect();

    Ok(Json(ProductsResponse {
        count: products.len(),
        products,
    }))
}

async fn get_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Extension(ctx): Extension<OperationContext>,
    Path(id): Path<String>,
) -> AppResult<Json<ProductRecord>> {
    require_role(&auth, Page::Products.allowed_roles())?;

    let product = state
        .catalog
        .get(&ctx, &id)
        .await?
        .ok_or(AppError::ProductNotFound(id))?;

    Ok(Json(product.into()))
}

async fn create_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Extension(ctx): Extension<OperationContext>,
    Json(input): Json<CreateProductInput>,
) -> AppResult<(StatusCode, Json<ProductRecord>)> {
    require_role(&auth, Page::Products.allowed_roles())?;

    let product = state.catalog.create(&ctx, input).await?;
    tracing::info!(
        product_id = %product.id,
        user_id = ?ctx.user_id,
        correlation_id = ?ctx.correlation_id,
        "Product created"
    );

    Ok((StatusCode::CREATED, Json(product.into())))
}

async fn update_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Extension(ctx): Extension<OperationContext>,
    Path(id): Path<String>,
    Json(input): Json<UpdateProductInput>,
) -> AppResult<Json<ProductRecord>> {
    require_role(&auth, Page::Products.allowed_roles())?;

    let product = state.catalog.update(&ctx, &id, input).await?;
    tracing::info!(
        product_id = %product.id,
        user_id = ?ctx.user_id,
        correlation_id = ?ctx.correlation_id,
        "Product updated"
    );

    Ok(Json(product.into()))
}

async fn delete_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Extension(ctx): Extension<OperationContext>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    require_role(&auth, Some(MANAGER_ONLY))?;

    if !state.catalog.delete(&ctx, &id).await? {
        return Err(AppError::ProductNotFound(id));
    }
    tracing::info!(
        product_id = %id,
        user_id = ?ctx.user_id,
        correlation_id = ?ctx.correlation_id,
        "Product deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

// =========================================================================
// Statistics
// =========================================================================

async fn product_stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Extension(ctx): Extension<OperationContext>,
) -> AppResult<Json<ProductStatsResponse>> {
    require_role(&auth, Page::Dashboard.allowed_roles())?;

    let stats = compute_aggregate_stats(&state.catalog.all(&ctx).await?);
    Ok(Json(ProductStatsResponse {
        in_stock_percentage: stats.in_stock_percentage(),
        stats,
    }))
}

async fn category_stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Extension(ctx): Extension<OperationContext>,
    Query(query): Query<CategoriesQuery>,
) -> AppResult<Json<CategoriesResponse>> {
    require_role(&auth, Page::Dashboard.allowed_roles())?;

    let mut categories = compute_category_stats(&state.catalog.all(&ctx).await?);
    if let Some(top) = query.top {
        categories = top_categories(categories, top);
    }

    Ok(Json(CategoriesResponse { categories }))
}

async fn dashboard(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Extension(ctx): Extension<OperationContext>,
) -> AppResult<Json<DashboardSummary>> {
    require_role(&auth, Page::Dashboard.allowed_roles())?;

    let products = state.catalog.all(&ctx).await?;
    Ok(Json(DashboardSummary::from_products(&products)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StockStatus;
    use crate::filter::StatusFilter;

    fn auth(role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser {
            user: User::new("1", "someone@slooze.com", "Someone", role),
            token: "t".to_string(),
        }
    }

    #[test]
    fn test_login_request_deserialize() {
        let json = r#"{"email": "manager@slooze.com", "password": "manager123"}"#;
        let req: LoginRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.email, "manager@slooze.com");
        assert_eq!(req.password, "manager123");
    }

    #[test]
    fn test_login_response_is_camel_case() {
        let response = LoginResponse {
            access_token: "abc".to_string(),
            user: auth(UserRole::Manager).user,
            landing_page: "/dashboard",
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["accessToken"], "abc");
        assert_eq!(value["landingPage"], "/dashboard");
        assert_eq!(value["user"]["role"], "manager");
    }

    #[test]
    fn test_product_filter_query_deserialize() {
        let parse = |uri: &str| {
            Query::<ProductFilter>::try_from_uri(&uri.parse().unwrap())
                .unwrap()
                .0
        };

        let filter = parse("/products?search=tea&status=low-stock");
        assert_eq!(filter.search.as_deref(), Some("tea"));
        assert_eq!(filter.status, StatusFilter::Only(StockStatus::LowStock));

        assert!(parse("/products?status=all").is_match_all());
        assert!(Query::<ProductFilter>::try_from_uri(&"/products?status=expired".parse().unwrap()).is_err());
    }

    #[test]
    fn test_update_request_deserialize() {
        let input: UpdateProductInput = serde_json::from_str(r#"{"quantity": 60}"#).unwrap();
        assert_eq!(input.quantity, Some(60));
        assert!(input.name.is_none());
    }

    #[test]
    fn test_require_role() {
        assert!(require_role(&auth(UserRole::Storekeeper), Page::Products.allowed_roles()).is_ok());
        assert!(matches!(
            require_role(&auth(UserRole::Storekeeper), Some(MANAGER_ONLY)),
            Err(AppError::Forbidden { redirect: "/products" })
        ));
        assert!(require_role(&auth(UserRole::Manager), Page::Dashboard.allowed_roles()).is_ok());
    }
}
