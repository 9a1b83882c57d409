//! Authentication Errors

use crate::graphql::GraphQlError;

/// Errors raised while signing in or handling a session
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Unknown email or wrong password. The two are never told apart.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Remote identity backend failure
    #[error("Authentication backend error: {0}")]
    Remote(#[from] GraphQlError),

    /// Persisted session could not be read or written
    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Persisted session is not valid JSON
    #[error("Session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AuthError {
    /// Failures the user can fix by retyping credentials
    pub fn is_rejection(&self) -> bool {
        matches!(self, AuthError::InvalidCredentials)
    }
}
