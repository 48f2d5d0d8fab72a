use std::collections::HashMap;
use std::sync::Arc;

use rand::{distributions::Alphanumeric, thread_rng, Rng};
use tokio::sync::RwLock;

/// Generate a cryptographically secure random session token.
pub fn generate_session_token() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// RFC 3339 expiry timestamp `ttl_secs` from now.
#[must_use]
pub fn expiry_timestamp(ttl_secs: i64) -> String {
    (chrono::Utc::now() + chrono::Duration::seconds(ttl_secs)).to_rfc3339()
}

/// In-memory session registry for the store modes without a database.
///
/// Maps issued tokens to usernames. The cookie only ever carries a token
/// from here, never anything an attacker could fabricate. Sessions live
/// until logout or process restart, mirroring the sessions table the
/// database mode keeps.
#[derive(Debug, Clone, Default)]
pub struct SessionCache {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl SessionCache {
    /// Issue a fresh token for the given user.
    pub async fn issue(&self, username: &str) -> String {
        let token = generate_session_token();
        self.inner
            .write()
            .await
            .insert(token.clone(), username.to_string());
        token
    }

    /// The user a token was issued to, if it is live.
    pub async fn username(&self, token: &str) -> Option<String> {
        self.inner.read().await.get(token).cloned()
    }

    /// Revoke a token.
    pub async fn revoke(&self, token: &str) {
        self.inner.write().await.remove(token);
    }
}
