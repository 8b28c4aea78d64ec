//! Authentication policy

use thiserror::Error;

#[cfg(test)]
use mockall::mock;

/// An error raised when a request fails authentication
#[derive(Debug, Error)]
pub enum AuthError {
    /// The supplied secret was missing or did not match
    #[error("Invalid or missing password")]
    InvalidCredentials,
}

/// Decides whether a request carrying an optional shared secret is allowed
/// to trigger mail dispatch.
///
/// Kept behind a trait so the body-password check can be replaced with a
/// stronger scheme without touching the handlers.
pub trait AuthPolicy: Clone + Send + Sync + 'static {
    /// Validate the secret supplied with a request.
    fn validate(&self, secret: Option<&str>) -> Result<(), AuthError>;
}

#[cfg(test)]
mock! {
    pub AuthPolicy {}

    impl Clone for AuthPolicy {
        fn clone(&self) -> Self;
    }

    impl AuthPolicy for AuthPolicy {
        fn validate<'a>(&self, secret: Option<&'a str>) -> Result<(), AuthError>;
    }
}
