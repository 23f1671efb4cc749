//! Login attempt ledger bounding retries per identity.
//!
//! Flow Overview:
//! 1) Every login calls `check_and_increment` before credentials are checked.
//! 2) Attempts are counted per normalized identity inside a fixed window
//!    anchored at the identity's first attempt.
//! 3) A periodic sweep drops records whose window has passed.
//!
//! The ledger is a pure boolean gate: it never errors, and a denied call
//! leaves the count untouched.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

pub(crate) const DEFAULT_MAX_LOGIN_ATTEMPTS: u32 = 5;
pub(crate) const DEFAULT_LOGIN_WINDOW: Duration = Duration::from_secs(60 * 60);

#[derive(Clone, Copy, Debug)]
struct AttemptRecord {
    count: u32,
    reset_at: Instant,
}

/// Per-identity login attempt counters.
///
/// Every check is a single read-modify-write under one lock acquisition, so
/// concurrent logins for the same identity cannot race past the limit.
pub struct AttemptLedger {
    attempts: Mutex<HashMap<String, AttemptRecord>>,
    max_attempts: u32,
    window: Duration,
}

impl AttemptLedger {
    #[must_use]
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self {
            attempts: Mutex::new(HashMap::new()),
            max_attempts,
            window,
        }
    }

    /// Record one attempt for `identity` and report whether it is admitted.
    pub async fn check_and_increment(&self, identity: &str) -> bool {
        self.check_and_increment_at(identity, Instant::now()).await
    }

    pub(crate) async fn check_and_increment_at(&self, identity: &str, now: Instant) -> bool {
        let mut attempts = self.attempts.lock().await;
        match attempts.get_mut(identity) {
            None => {
                attempts.insert(
                    identity.to_string(),
                    AttemptRecord {
                        count: 1,
                        reset_at: now + self.window,
                    },
                );
                true
            }
            // A record past its window is stale: replace, never reuse.
            Some(record) if now > record.reset_at => {
                record.count = 1;
                record.reset_at = now + self.window;
                true
            }
            Some(record) if record.count >= self.max_attempts => false,
            Some(record) => {
                record.count += 1;
                true
            }
        }
    }

    /// Drop every record whose window has passed.
    ///
    /// Runs under the same lock as the checks; a record still inside its
    /// window is never removed.
    pub async fn sweep_expired(&self) {
        self.sweep_expired_at(Instant::now()).await;
    }

    pub(crate) async fn sweep_expired_at(&self, now: Instant) {
        let mut attempts = self.attempts.lock().await;
        attempts.retain(|_, record| now <= record.reset_at);
    }

    #[cfg(test)]
    async fn count_for(&self, identity: &str) -> Option<u32> {
        self.attempts
            .lock()
            .await
            .get(identity)
            .map(|record| record.count)
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.attempts.lock().await.len()
    }
}
