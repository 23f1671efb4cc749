//! Console configuration and shared per-process state.

use std::sync::Arc;
use std::time::Duration;

use crate::cloudflare::CredentialVerifier;
use crate::probe::ModeProber;

use super::rate_limit::{AttemptLedger, DEFAULT_LOGIN_WINDOW, DEFAULT_MAX_LOGIN_ATTEMPTS};
use super::store::SessionStore;

const DEFAULT_SESSION_TTL_SECONDS: u64 = 3600;
const DEFAULT_REMEMBER_TTL_SECONDS: u64 = 365 * 24 * 60 * 60;
const DEFAULT_COOKIE_MAX_AGE_SECONDS: u64 = 86_400;
const DEFAULT_SWEEP_INTERVAL_SECONDS: u64 = 5 * 60;

#[derive(Clone, Debug)]
pub struct AuthConfig {
    max_login_attempts: u32,
    login_window: Duration,
    session_ttl: Duration,
    remember_ttl: Duration,
    cookie_max_age: Duration,
    sweep_interval: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_login_attempts: DEFAULT_MAX_LOGIN_ATTEMPTS,
            login_window: DEFAULT_LOGIN_WINDOW,
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECONDS),
            remember_ttl: Duration::from_secs(DEFAULT_REMEMBER_TTL_SECONDS),
            cookie_max_age: Duration::from_secs(DEFAULT_COOKIE_MAX_AGE_SECONDS),
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECONDS),
        }
    }

    #[must_use]
    pub fn with_max_login_attempts(mut self, attempts: u32) -> Self {
        self.max_login_attempts = attempts;
        self
    }

    #[must_use]
    pub fn with_login_window(mut self, window: Duration) -> Self {
        self.login_window = window;
        self
    }

    #[must_use]
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_remember_ttl(mut self, ttl: Duration) -> Self {
        self.remember_ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_cookie_max_age(mut self, max_age: Duration) -> Self {
        self.cookie_max_age = max_age;
        self
    }

    #[must_use]
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    #[must_use]
    pub fn max_login_attempts(&self) -> u32 {
        self.max_login_attempts
    }

    #[must_use]
    pub fn login_window(&self) -> Duration {
        self.login_window
    }

    #[must_use]
    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    #[must_use]
    pub fn remember_ttl(&self) -> Duration {
        self.remember_ttl
    }

    #[must_use]
    pub fn cookie_max_age(&self) -> Duration {
        self.cookie_max_age
    }

    #[must_use]
    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }
}

/// Shared state for the whole console, built once at startup and injected
/// into every handler. There are no package-level globals.
pub struct AppState {
    config: AuthConfig,
    ledger: AttemptLedger,
    sessions: SessionStore,
    verifier: Arc<dyn CredentialVerifier>,
    prober: ModeProber,
}

impl AppState {
    pub fn new(
        config: AuthConfig,
        verifier: Arc<dyn CredentialVerifier>,
        prober: ModeProber,
    ) -> Self {
        let ledger = AttemptLedger::new(config.max_login_attempts(), config.login_window());
        Self {
            config,
            ledger,
            sessions: SessionStore::new(),
            verifier,
            prober,
        }
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    #[must_use]
    pub fn ledger(&self) -> &AttemptLedger {
        &self.ledger
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub(crate) fn verifier(&self) -> &dyn CredentialVerifier {
        self.verifier.as_ref()
    }

    #[must_use]
    pub fn prober(&self) -> &ModeProber {
        &self.prober
    }
}
