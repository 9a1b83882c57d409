//! Slooze inventory server
//!
//! Serves the product catalog, dashboard statistics and login over a JSON
//! API. Products live in memory or behind a GraphQL inventory service.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use slooze_inventory::auth::{Authenticator, CredentialStore, GraphQlAuthenticator};
use slooze_inventory::catalog::{CatalogRepository, GraphQlCatalog, InMemoryCatalog};
use slooze_inventory::config::{Backend, LogFormat};
use slooze_inventory::graphql::GraphQlClient;
use slooze_inventory::{build_router, AppState, Config};

/// Initialize tracing/logging
fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "slooze_inventory=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

fn graphql_client(url: &str, token: &Option<String>) -> GraphQlClient {
    let client = GraphQlClient::new(url);
    match token {
        Some(token) => client.with_token(token.clone()),
        None => client,
    }
}

fn build_catalog(config: &Config) -> Arc<dyn CatalogRepository> {
    match &config.catalog_backend {
        Backend::Memory if config.seed_sample_data => Arc::new(InMemoryCatalog::with_sample_data()),
        Backend::Memory => Arc::new(InMemoryCatalog::new()),
        Backend::GraphQl { url, token } => {
            tracing::info!(endpoint = %url, "Using GraphQL catalog");
            Arc::new(GraphQlCatalog::new(graphql_client(url, token)))
        }
    }
}

fn build_authenticator(config: &Config) -> Arc<dyn Authenticator> {
    match &config.auth_backend {
        Backend::Memory => Arc::new(CredentialStore::demo()),
        Backend::GraphQl { url, token } => {
            tracing::info!(endpoint = %url, "Using GraphQL login");
            Arc::new(GraphQlAuthenticator::new(graphql_client(url, token)))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tracing::info!(environment = %config.environment, "Starting Slooze inventory server");

    let state = AppState::new(build_catalog(&config), build_authenticator(&config));
    let app = build_router(state);

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped. Goodbye!");
    Ok(())
}

/// Shutdown signal handler for graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}
