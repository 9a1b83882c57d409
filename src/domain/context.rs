//! Operation Context
//!
//! Contains metadata about the current operation for tracing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserRole;

/// Context for an operation, attached to every authenticated request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationContext {
    /// User that issued the request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Role of that user at the time of the request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,

    /// Correlation ID for request tracing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<Uuid>,

    /// Backend token forwarded to a remote catalog; never serialized
    #[serde(skip)]
    pub access_token: Option<String>,
}

impl OperationContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self {
            user_id: None,
            role: None,
            correlation_id: None,
            access_token: None,
        }
    }

    /// Create context with the requesting user
    pub fn with_user(mut self, user_id: impl Into<String>, role: UserRole) -> Self {
        self.user_id = Some(user_id.into());
        self.role = Some(role);
        self
    }

    /// Create context with correlation ID
    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    /// Attach the backend token issued at login
    pub fn with_access_token(mut self, access_token: Option<String>) -> Self {
        self.access_token = access_token;
        self
    }

    /// Generate a new correlation ID if not present
    pub fn ensure_correlation_id(&mut self) -> Uuid {
        *self.correlation_id.get_or_insert_with(Uuid::new_v4)
    }
}

impl Default for OperationContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_builder() {
        let correlation_id = Uuid::new_v4();

        let context = OperationContext::new()
            .with_user("1", UserRole::Manager)
            .with_correlation_id(correlation_id);

        assert_eq!(context.user_id.as_deref(), Some("1"));
        assert_eq!(context.role, Some(UserRole::Manager));
        assert_eq!(context.correlation_id, Some(correlation_id));
    }

    #[test]
    fn test_ensure_correlation_id() {
        let mut context = OperationContext::new();
        assert!(context.correlation_id.is_none());

        let id = context.ensure_correlation_id();
        assert_eq!(context.correlation_id, Some(id));

        // Calling again should return the same ID
        assert_eq!(context.ensure_correlation_id(), id);
    }

    #[test]
    fn test_access_token_is_not_serialized() {
        let context = OperationContext::new()
            .with_user("1", UserRole::Manager)
            .with_access_token(Some("backend-jwt".to_string()));
        assert_eq!(context.access_token.as_deref(), Some("backend-jwt"));

        let json = serde_json::to_string(&context).unwrap();
        assert!(!json.contains("backend-jwt"));
    }
}
