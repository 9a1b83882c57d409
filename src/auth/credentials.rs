//! Credential checks.
//!
//! [`CredentialStore`] is the demo allow-list; it compares plaintext and
//! must not guard anything real. [`GraphQlAuthenticator`] delegates to the
//! backend's `login` mutation instead.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::AuthError;
use crate::domain::{User, UserRole};
use crate::graphql::{operation, GraphQlClient};

const LOGIN_MUTATION: &str = "mutation Login($email: String!, $password: String!) { login(loginInput: { email: $email, password: $password }) { accessToken user { id email name role } } }";

/// Result of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub user: User,
    /// Token issued by the identity backend, if it issues one
    pub access_token: Option<String>,
}

/// Resolves a credential pair to a user.
#[async_trait]
pub trait Authenticator: Send + Sync + 'static {
    async fn authenticate(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError>;
}

#[derive(Debug, Clone)]
struct CredentialEntry {
    email: String,
    password: String,
    user: User,
}

/// Fixed list of (email, password, user) entries.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    entries: Vec<CredentialEntry>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The two demo accounts: one manager, one storekeeper.
    pub fn demo() -> Self {
        Self::new()
            .with_user(
                "manager123",
                User::new("1", "manager@slooze.com", "Alex Manager", UserRole::Manager),
            )
            .with_user(
                "keeper123",
                User::new("2", "keeper@slooze.com", "Sam Keeper", UserRole::Storekeeper),
            )
    }

    /// Register `user` under its own email with `password`.
    pub fn with_user(mut self, password: impl Into<String>, user: User) -> Self {
        self.entries.push(CredentialEntry {
            email: user.email.clone(),
            password: password.into(),
            user,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact match on both email and password.
    pub fn verify(&self, email: &str, password: &str) -> Option<&User> {
        self.entries
            .iter()
            .find(|entry| entry.email == email && entry.password == password)
            .map(|entry| &entry.user)
    }
}

#[async_trait]
impl Authenticator for CredentialStore {
    async fn authenticate(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        match self.verify(email, password) {
            Some(user) => {
                tracing::info!(user_id = %user.id, role = %user.role, "Login succeeded");
                Ok(LoginOutcome {
                    user: user.clone(),
                    access_token: None,
                })
            }
            None => {
                tracing::warn!("Login rejected");
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct LoginData {
    login: Option<LoginPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginPayload {
    access_token: String,
    user: User,
}

/// Signs in through the backend `login` mutation.
#[derive(Debug, Clone)]
pub struct GraphQlAuthenticator {
    client: GraphQlClient,
}

impl GraphQlAuthenticator {
    pub fn new(client: GraphQlClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Authenticator for GraphQlAuthenticator {
    async fn authenticate(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let body = operation(
            "Login",
            LOGIN_MUTATION,
            json!({ "email": email, "password": password }),
        );
        let data: LoginData = self
            .client
            .execute(&body, None)
            .await
            .map_err(|e| {
                // The backend reports bad credentials as a GraphQL error.
                if e.is_transport() {
                    AuthError::Remote(e)
                } else {
                    tracing::warn!(error = %e, "Login rejected by backend");
                    AuthError::InvalidCredentials
                }
            })?;

        let payload = data.login.ok_or(AuthError::InvalidCredentials)?;
        Ok(LoginOutcome {
            user: payload.user,
            access_token: Some(payload.access_token),
        })
    }
}
