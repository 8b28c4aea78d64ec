//! Shared-secret authentication policy

use clap::Parser;
use constant_time_eq::constant_time_eq;

use crate::domain::auth::policy::{AuthError, AuthPolicy};

/// Authentication configuration
#[derive(Clone, Debug, Parser)]
pub struct AuthConfig {
    /// The shared secret expected in the request body
    #[arg(long, env = "API_PASSWORD")]
    pub api_password: String,
}

/// Compares the request body password against a configured value in
/// constant time.
#[derive(Clone, Debug)]
pub struct SharedSecretPolicy {
    secret: String,
}

impl SharedSecretPolicy {
    /// Create a new shared-secret policy
    pub fn new(config: AuthConfig) -> Self {
        Self {
            secret: config.api_password,
        }
    }
}

impl AuthPolicy for SharedSecretPolicy {
    fn validate(&self, secret: Option<&str>) -> Result<(), AuthError> {
        let supplied = secret.ok_or(AuthError::InvalidCredentials)?;

        if constant_time_eq(supplied.as_bytes(), self.secret.as_bytes()) {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> SharedSecretPolicy {
        SharedSecretPolicy::new(AuthConfig {
            api_password: "supersecret".to_string(),
        })
    }

    #[test]
    fn test_matching_secret_is_allowed() {
        assert!(policy().validate(Some("supersecret")).is_ok());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let result = policy().validate(Some("wrong"));
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn test_missing_secret_is_rejected() {
        let result = policy().validate(None);
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }
}
