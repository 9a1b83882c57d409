//! Bearer token registry.
//!
//! Tokens are 32 random bytes, hex encoded. Only their SHA-256 digest is
//! kept, the same way API keys are stored hashed.

use rand::RngCore;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::User;

const TOKEN_BYTES: usize = 32;

/// Live tokens per user; issuing one more evicts that user's oldest.
pub const MAX_TOKENS_PER_USER: usize = 5;

/// What a token resolves to.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenSession {
    pub user: User,
    /// Token handed out by the remote backend at login, if any
    pub backend_token: Option<String>,
}

#[derive(Debug)]
struct Entry {
    session: TokenSession,
    issued: u64,
}

#[derive(Debug, Default)]
struct Sessions {
    by_digest: HashMap<String, Entry>,
    next_seq: u64,
}

/// Issued access tokens and the session each one belongs to.
#[derive(Debug, Default)]
pub struct TokenRegistry {
    sessions: RwLock<Sessions>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token for `user`, remembering the backend's token.
    pub async fn issue(&self, user: User, backend_token: Option<String>) -> String {
        let mut raw = [0u8; TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut raw);
        let token = hex::encode(raw);

        let mut sessions = self.sessions.write().await;
        evict_oldest(&mut sessions, &user.id);

        let issued = sessions.next_seq;
        sessions.next_seq += 1;

        tracing::debug!(user_id = %user.id, "Access token issued");
        sessions.by_digest.insert(
            digest(&token),
            Entry {
                session: TokenSession { user, backend_token },
                issued,
            },
        );
        token
    }

    pub async fn resolve(&self, token: &str) -> Option<TokenSession> {
        self.sessions
            .read()
            .await
            .by_digest
            .get(&digest(token))
            .map(|entry| entry.session.clone())
    }

    /// Returns `false` if the token was unknown.
    pub async fn revoke(&self, token: &str) -> bool {
        self.sessions
            .write()
            .await
            .by_digest
            .remove(&digest(token))
            .is_some()
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.read().await.by_digest.len()
    }
}

/// Make room for one more token belonging to `user_id`.
fn evict_oldest(sessions: &mut Sessions, user_id: &str) {
    let mut owned: Vec<(u64, &String)> = sessions
        .by_digest
        .iter()
        .filter(|(_, entry)| entry.session.user.id == user_id)
        .map(|(key, entry)| (entry.issued, key))
        .collect();

    if owned.len() < MAX_TOKENS_PER_USER {
        return;
    }

    owned.sort_unstable();
    let excess = owned.len() + 1 - MAX_TOKENS_PER_USER;
    let stale: Vec<String> = owned
        .into_iter()
        .take(excess)
        .map(|(_, key)| key.clone())
        .collect();

    for key in stale {
        sessions.by_digest.remove(&key);
    }
    tracing::debug!(user_id = %user_id, evicted = excess, "Oldest access tokens evicted");
}

fn digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
