//! Recurring expiry sweep for the attempt ledger and session store.
//!
//! The sweep runs on its own fixed period, shares the stores' locks with
//! request traffic, and stops when the server signals shutdown.

use std::{sync::Arc, time::Duration};
use tokio::{sync::watch, task::JoinHandle, time};
use tracing::debug;

use super::handlers::auth::AppState;

/// Spawn the sweep task. Flipping `stop` ends the task at the next tick.
pub fn spawn(
    state: Arc<AppState>,
    period: Duration,
    mut stop: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let period = if period.is_zero() {
            Duration::from_secs(5 * 60)
        } else {
            period
        };
        let mut ticker = time::interval(period);
        ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
        // An interval's first tick fires immediately; consume it so the
        // first sweep happens one full period after startup.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    state.ledger().sweep_expired().await;
                    state.sessions().sweep_expired().await;
                    debug!("expiry sweep completed");
                }
                _ = stop.changed() => break,
            }
        }
    })
}
