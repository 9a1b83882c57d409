//! Authentication and role gating
//!
//! Credential checks, the page access gate, the client session state
//! machine and the server-side bearer token registry.

pub mod credentials;
pub mod error;
pub mod gate;
pub mod session;
pub mod tokens;

pub use credentials::{Authenticator, CredentialStore, GraphQlAuthenticator, LoginOutcome};
pub use error::AuthError;
pub use gate::{authorize, check_access, landing_page, navigation, AccessDecision, Page};
pub use session::{
    FileSessionStorage, MemorySessionStorage, Session, SessionState, SessionStorage,
    StoredSession,
};
pub use tokens::{TokenRegistry, TokenSession, MAX_TOKENS_PER_USER};
