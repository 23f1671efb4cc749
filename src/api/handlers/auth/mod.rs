//! Auth handlers and supporting modules.
//!
//! This module coordinates the credential gate: login rate limiting, session
//! lifecycle, and the per-route session gate.
//!
//! ## Rate limiting
//!
//! Login attempts are counted per identity in a fixed window (5 per 60
//! minutes by default) anchored at the identity's first attempt. A failed
//! credential check still consumes its slot.
//!
//! ## Sessions
//!
//! Session records live in process memory keyed by the SHA-256 hash of the
//! token; the raw token only ever travels in the `session_id` cookie or an
//! `Authorization: Bearer` header. Remember-me extends the record and the
//! cookie to 365 days in one operation.

mod error;
pub(crate) mod gate;
pub(crate) mod login;
pub(crate) mod principal;
mod rate_limit;
pub(crate) mod session;
mod state;
mod store;
mod utils;

pub use error::AuthError;
pub use gate::RouteClass;
pub use principal::Principal;
pub use rate_limit::AttemptLedger;
pub use state::{AppState, AuthConfig};
pub use store::SessionStore;
