//! Client session.
//!
//! An explicit session object owned by whoever drives the UI. It starts in
//! `Loading`, tries to restore a persisted user, and from then on moves
//! between `Authenticated` and `Unauthenticated` on login and logout.
//! Sessions never expire on their own.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{check_access, AccessDecision, AuthError, Authenticator};
use crate::domain::{User, UserRole};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for [`Session::restore`]
    Loading,
    Unauthenticated,
    Authenticated(User),
}

/// What gets persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    pub user: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// Persistence for the signed-in user.
pub trait SessionStorage: Send + Sync {
    fn load(&self) -> Result<Option<StoredSession>, AuthError>;
    fn save(&self, session: &StoredSession) -> Result<(), AuthError>;
    fn clear(&self) -> Result<(), AuthError>;
}

/// Storage that lives as long as the process.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    slot: Mutex<Option<StoredSession>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: StoredSession) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<Option<StoredSession>, AuthError> {
        Ok(self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save(&self, session: &StoredSession) -> Result<(), AuthError> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

/// JSON file on disk. A missing file means no session.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Result<Option<StoredSession>, AuthError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, session: &StoredSession) -> Result<(), AuthError> {
        fs::write(&self.path, serde_json::to_vec_pretty(session)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Session context for one client.
#[derive(Debug)]
pub struct Session<S> {
    state: SessionState,
    access_token: Option<String>,
    storage: S,
}

impl<S: SessionStorage> Session<S> {
    pub fn new(storage: S) -> Self {
        Self {
            state: SessionState::Loading,
            access_token: None,
            storage,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.state == SessionState::Loading
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Leave `Loading` by reading persisted state.
    ///
    /// Unreadable state is discarded and the session ends up signed out.
    pub fn restore(&mut self) -> &SessionState {
        match self.storage.load() {
            Ok(Some(stored)) => {
                tracing::debug!(user_id = %stored.user.id, "Session restored");
                self.access_token = stored.access_token;
                self.state = SessionState::Authenticated(stored.user);
            }
            Ok(None) => self.sign_out_locally(),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable session");
                if let Err(e) = self.storage.clear() {
                    tracing::warn!(error = %e, "Failed to clear session storage");
                }
                self.sign_out_locally();
            }
        }
        &self.state
    }

    /// Sign in and persist the user. A rejected login leaves the session
    /// signed out.
    ///
    /// The in-memory state always follows a successful login. If the user
    /// cannot be persisted, any older persisted session is cleared so a
    /// later [`Session::restore`] cannot bring back a previous user.
    pub async fn login(
        &mut self,
        authenticator: &dyn Authenticator,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let outcome = match authenticator.authenticate(email, password).await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.sign_out_locally();
                return Err(e);
            }
        };

        let stored = StoredSession {
            user: outcome.user,
            access_token: outcome.access_token,
        };
        self.access_token = stored.access_token.clone();
        self.state = SessionState::Authenticated(stored.user.clone());

        if let Err(e) = self.storage.save(&stored) {
            tracing::warn!(error = %e, user_id = %stored.user.id, "Failed to persist session");
            if let Err(e) = self.storage.clear() {
                tracing::warn!(error = %e, "Failed to clear session storage");
            }
        }

        Ok(stored.user)
    }

    /// Forget the user and wipe persisted state.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.sign_out_locally();
        self.storage.clear()
    }

    /// Gate check for the current user. While loading nothing is decided
    /// yet, so `None` is returned.
    pub fn access(&self, allowed_roles: Option<&[UserRole]>) -> Option<AccessDecision> {
        if self.is_loading() {
            return None;
        }
        Some(check_access(self.user(), allowed_roles))
    }

    fn sign_out_locally(&mut self) {
        self.access_token = None;
        self.state = SessionState::Unauthenticated;
    }
}
