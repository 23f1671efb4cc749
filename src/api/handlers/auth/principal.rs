//! Authenticated operator context.

use secrecy::SecretString;

/// Operator identity and provider credential derived from a valid session.
///
/// Inserted into request extensions by the session gate so downstream
/// provider calls never reach back into the store.
#[derive(Clone, Debug)]
pub struct Principal {
    pub identity: String,
    pub credential: SecretString,
}
