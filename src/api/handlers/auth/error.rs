//! Error taxonomy for the credential gate. None of these are fatal; every
//! variant is resolved at the request boundary.

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Too many login attempts inside the window; admission resumes once the
    /// window elapses.
    #[error("too many login attempts")]
    RateLimitExceeded,
    /// Identity or secret rejected. Deliberately silent on which of the two,
    /// so identities cannot be enumerated.
    #[error("invalid credentials")]
    InvalidCredential,
    /// No live session accompanied the request.
    #[error("session expired or missing")]
    SessionExpiredOrMissing,
}

impl AuthError {
    /// Query-string code used when bouncing the browser back to the login
    /// entry point.
    pub(crate) fn query_code(self) -> &'static str {
        match self {
            Self::RateLimitExceeded => "rate_limited",
            Self::InvalidCredential => "invalid_credentials",
            Self::SessionExpiredOrMissing => "session_expired",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AuthError;

    #[test]
    fn query_codes_are_distinct() {
        assert_eq!(AuthError::RateLimitExceeded.query_code(), "rate_limited");
        assert_eq!(
            AuthError::InvalidCredential.query_code(),
            "invalid_credentials"
        );
        assert_eq!(
            AuthError::SessionExpiredOrMissing.query_code(),
            "session_expired"
        );
    }
}
