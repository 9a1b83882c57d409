//! Backend token pass-through tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::StatusCode;

mod common;

use common::{login, send, MANAGER};
use slooze_inventory::auth::{AuthError, Authenticator, CredentialStore, LoginOutcome};
use slooze_inventory::catalog::{CatalogError, CatalogRepository, InMemoryCatalog};
use slooze_inventory::domain::{CreateProductInput, Product, UpdateProductInput};
use slooze_inventory::filter::ProductFilter;
use slooze_inventory::{build_router, AppState, OperationContext};

/// Demo accounts, plus a backend token like the remote `login` mutation returns
struct IssuingAuthenticator(CredentialStore);

#[async_trait]
impl Authenticator for IssuingAuthenticator {
    async fn authenticate(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let outcome = self.0.authenticate(email, password).await?;
        Ok(LoginOutcome {
            access_token: Some(format!("backend-{}", outcome.user.id)),
            ..outcome
        })
    }
}

/// In-memory catalog that remembers which backend token each call carried
struct RecordingCatalog {
    inner: InMemoryCatalog,
    seen: Mutex<Vec<Option<String>>>,
}

impl RecordingCatalog {
    fn seeded() -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryCatalog::with_sample_data(),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn record(&self, ctx: &OperationContext) {
        self.seen.lock().unwrap().push(ctx.access_token.clone());
    }
}

#[async_trait]
impl CatalogRepository for RecordingCatalog {
    async fn list(
        &self,
        ctx: &OperationContext,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, CatalogError> {
        self.record(ctx);
        self.inner.list(ctx, filter).await
    }

    async fn get(&self, ctx: &OperationContext, id: &str) -> Result<Option<Product>, CatalogError> {
        self.record(ctx);
        self.inner.get(ctx, id).await
    }

    async fn create(
        &self,
        ctx: &OperationContext,
        input: CreateProductInput,
    ) -> Result<Product, CatalogError> {
        self.record(ctx);
        self.inner.create(ctx, input).await
    }

    async fn update(
        &self,
        ctx: &OperationContext,
        id: &str,
        input: UpdateProductInput,
    ) -> Result<Product, CatalogError> {
        self.record(ctx);
        self.inner.update(ctx, id, input).await
    }

    async fn delete(&self, ctx: &OperationContext, id: &str) -> Result<bool, CatalogError> {
        self.record(ctx);
        self.inner.delete(ctx, id).await
    }
}

#[tokio::test]
async fn test_backend_token_reaches_catalog() {
    let catalog = RecordingCatalog::seeded();
    let app = build_router(AppState::new(
        catalog.clone(),
        Arc::new(IssuingAuthenticator(CredentialStore::demo())),
    ));

    let token = login(&app, MANAGER).await;
    assert_ne!(token, "backend-1");

    let (status, _) = send(&app, "GET", "/api/v1/products", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", "/api/v1/dashboard", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let seen = catalog.seen.lock().unwrap().clone();
    assert_eq!(seen, vec![Some("backend-1".to_string()); 2]);
}

#[tokio::test]
async fn test_local_login_sends_no_backend_token() {
    let catalog = RecordingCatalog::seeded();
    let app = build_router(AppState::new(catalog.clone(), Arc::new(CredentialStore::demo())));

    let token = login(&app, MANAGER).await;
    let (status, _) = send(&app, "GET", "/api/v1/products/1", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(*catalog.seen.lock().unwrap(), vec![None]);
}
