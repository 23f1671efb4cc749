//! API handlers for the zone console.
//!
//! This module organizes the console's route handlers: the credential gate
//! and session lifecycle under `auth`, the prober-backed zone views under
//! `zones`, plus the root and health endpoints.

pub mod auth;
pub mod health;
pub mod root;
pub mod zones;
