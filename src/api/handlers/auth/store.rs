//! In-memory session records keyed by hashed token.
//!
//! Sessions are process-local: a restart signs every operator out. Reads
//! (validation on every protected request) far outnumber writes, so the map
//! sits behind a read-write lock.

use secrecy::SecretString;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use super::state::AuthConfig;
use super::utils::{generate_session_token, hash_session_token};

/// One authenticated operator session.
#[derive(Clone)]
pub(crate) struct Session {
    pub(crate) identity: String,
    pub(crate) credential: SecretString,
    pub(crate) created_at: Instant,
    pub(crate) expires_at: Instant,
    pub(crate) remember: bool,
}

/// Outcome of issuing a session: the raw token for the cookie and the
/// cookie max-age that matches the record's lifetime branch.
pub(crate) struct CreatedSession {
    pub(crate) token: String,
    pub(crate) cookie_max_age: Duration,
}

pub struct SessionStore {
    sessions: RwLock<HashMap<Vec<u8>, Session>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Issue a fresh session for `identity`.
    ///
    /// Record TTL and cookie max-age come from the same branch on `remember`,
    /// so the session and its transport cookie cannot disagree. A repeated
    /// login re-issues token, record, and cookie together.
    pub(crate) async fn create(
        &self,
        identity: &str,
        credential: SecretString,
        remember: bool,
        config: &AuthConfig,
    ) -> anyhow::Result<CreatedSession> {
        self.create_at(identity, credential, remember, config, Instant::now())
            .await
    }

    pub(crate) async fn create_at(
        &self,
        identity: &str,
        credential: SecretString,
        remember: bool,
        config: &AuthConfig,
        now: Instant,
    ) -> anyhow::Result<CreatedSession> {
        let token = generate_session_token()?;
        let (ttl, cookie_max_age) = if remember {
            (config.remember_ttl(), config.remember_ttl())
        } else {
            (config.session_ttl(), config.cookie_max_age())
        };
        let session = Session {
            identity: identity.to_string(),
            credential,
            created_at: now,
            expires_at: now + ttl,
            remember,
        };
        debug_assert!(session.expires_at > session.created_at);
        self.sessions
            .write()
            .await
            .insert(hash_session_token(&token), session);
        Ok(CreatedSession {
            token,
            cookie_max_age,
        })
    }

    /// Resolve a raw token into its session, or `None` when the token is
    /// unknown or the session has expired. Expired records are left in place
    /// for the sweep; there is no implicit renewal.
    pub(crate) async fn validate(&self, token: &str) -> Option<Session> {
        self.validate_at(token, Instant::now()).await
    }

    pub(crate) async fn validate_at(&self, token: &str, now: Instant) -> Option<Session> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(&hash_session_token(token))?;
        if now > session.expires_at {
            return None;
        }
        Some(session.clone())
    }

    /// Remove the session for `token` unconditionally.
    pub(crate) async fn destroy(&self, token: &str) {
        self.sessions.write().await.remove(&hash_session_token(token));
    }

    /// Drop every record past its expiry.
    pub async fn sweep_expired(&self) {
        self.sweep_expired_at(Instant::now()).await;
    }

    pub(crate) async fn sweep_expired_at(&self, now: Instant) {
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, session| now <= session.expires_at);
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    fn secret() -> SecretString {
        SecretString::from("api-key".to_string())
    }

    #[tokio::test]
    async fn default_session_uses_configured_ttl() {
        let store = SessionStore::new();
        let config = AuthConfig::new();
        let t0 = Instant::now();

        let created = store
            .create_at("a@x.com", secret(), false, &config, t0)
            .await
            .unwrap();
        let session = store.validate_at(&created.token, t0).await.unwrap();

        assert_eq!(session.expires_at - session.created_at, config.session_ttl());
        assert_eq!(created.cookie_max_age, Duration::from_secs(86_400));
        assert!(!session.remember);
    }

    #[tokio::test]
    async fn remember_session_extends_record_and_cookie_together() {
        let store = SessionStore::new();
        let config = AuthConfig::new();
        let t0 = Instant::now();

        let created = store
            .create_at("a@x.com", secret(), true, &config, t0)
            .await
            .unwrap();
        let session = store.validate_at(&created.token, t0).await.unwrap();

        assert_eq!(session.expires_at - session.created_at, 365 * DAY);
        assert_eq!(created.cookie_max_age, 365 * DAY);
        assert!(session.remember);
    }

    #[tokio::test]
    async fn validate_rejects_expired_record_that_still_exists() {
        let store = SessionStore::new();
        let config = AuthConfig::new();
        let t0 = Instant::now();

        let created = store
            .create_at("a@x.com", secret(), false, &config, t0)
            .await
            .unwrap();

        let past_expiry = t0 + config.session_ttl() + Duration::from_secs(1);
        assert!(store.validate_at(&created.token, past_expiry).await.is_none());
        // The record is only logically invalid until the sweep runs.
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn validate_rejects_unknown_token() {
        let store = SessionStore::new();
        assert!(store.validate("missing").await.is_none());
    }

    #[tokio::test]
    async fn destroy_removes_session() {
        let store = SessionStore::new();
        let config = AuthConfig::new();

        let created = store
            .create("a@x.com", secret(), false, &config)
            .await
            .unwrap();
        store.destroy(&created.token).await;
        assert!(store.validate(&created.token).await.is_none());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn sweep_drops_only_expired_sessions() {
        let store = SessionStore::new();
        let config = AuthConfig::new();
        let t0 = Instant::now();

        let expired = store
            .create_at("old@x.com", secret(), false, &config, t0)
            .await
            .unwrap();
        let live = store
            .create_at("new@x.com", secret(), true, &config, t0)
            .await
            .unwrap();

        store
            .sweep_expired_at(t0 + config.session_ttl() + Duration::from_secs(1))
            .await;

        assert!(store
            .validate_at(&expired.token, t0 + config.session_ttl())
            .await
            .is_none());
        assert!(store.validate_at(&live.token, t0 + DAY).await.is_some());
        assert_eq!(store.len().await, 1);
    }
}
