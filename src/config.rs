//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;

/// Where products (and, optionally, logins) come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    /// In-process data
    Memory,
    /// Remote GraphQL inventory API
    GraphQl { url: String, token: Option<String> },
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Product catalog backend
    pub catalog_backend: Backend,

    /// Credential backend
    pub auth_backend: Backend,

    /// Seed the in-memory catalog with the sample inventory
    pub seed_sample_data: bool,

    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        let graphql_url = lookup("GRAPHQL_URL");
        let graphql_token = lookup("GRAPHQL_TOKEN");

        let catalog_backend = parse_backend(
            "CATALOG_BACKEND",
            lookup("CATALOG_BACKEND").as_deref().unwrap_or("memory"),
            &graphql_url,
            &graphql_token,
        )?;

        let auth_backend = parse_backend(
            "AUTH_BACKEND",
            lookup("AUTH_BACKEND").as_deref().unwrap_or("memory"),
            &graphql_url,
            &graphql_token,
        )?;

        let seed_sample_data = match lookup("SEED_SAMPLE_DATA").as_deref() {
            None | Some("true") | Some("1") => true,
            Some("false") | Some("0") => false,
            Some(_) => return Err(ConfigError::InvalidValue("SEED_SAMPLE_DATA")),
        };

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(_) => return Err(ConfigError::InvalidValue("LOG_FORMAT")),
        };

        Ok(Self {
            host,
            port,
            environment,
            catalog_backend,
            auth_backend,
            seed_sample_data,
            log_format,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn parse_backend(
    key: &'static str,
    value: &str,
    url: &Option<String>,
    token: &Option<String>,
) -> Result<Backend, ConfigError> {
    match value {
        "memory" => Ok(Backend::Memory),
        "graphql" => {
            let url = url.clone().ok_or(ConfigError::MissingEnv("GRAPHQL_URL"))?;
            Ok(Backend::GraphQl {
                url,
                token: token.clone(),
            })
        }
        _ => Err(ConfigError::InvalidValue(key)),
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
