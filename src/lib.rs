//! # Zono (DNS Zone Console Core)
//!
//! `zono` is a browser console for operating DNS zones through the Cloudflare
//! control-plane API. This crate holds the console's core: the rate-limited
//! credential gate with session lifecycle, and the network-mode prober that
//! classifies a zone's delegation setup from live DNS answers.
//!
//! ## Authentication
//!
//! Operators sign in with their provider email and API key. Credentials are
//! verified against the provider on every login; the console never stores
//! them beyond the in-memory session that carries them to provider calls.
//!
//! - **Attempt ledger:** login attempts are counted per identity inside a
//!   fixed window (5 attempts per 60 minutes by default). Exhausted
//!   identities are refused until the window elapses.
//! - **Sessions:** process-local, keyed by the SHA-256 hash of the session
//!   token. The raw token only ever lives in the `session_id` cookie.
//!   "Remember me" extends both the record and the cookie to 365 days in a
//!   single issue operation.
//! - **Gate:** protected routes are registered as either interactive
//!   (redirect to the login entry on failure) or programmatic (structured
//!   `401`). The class is fixed at registration time.
//!
//! ## Delegation probing
//!
//! Zone detail views ask the prober whether a hostname resolves through the
//! provider's anycast edge. The probe is advisory: every failure degrades to
//! "absent" and is only logged.
//!
//! All state is process-local and cleared on restart; the console is a
//! single-instance deployment.

pub mod api;
pub mod cli;
pub mod cloudflare;
pub mod probe;
