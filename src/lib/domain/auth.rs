//! Request authentication

pub mod policy;
pub mod shared_secret;

pub use policy::{AuthError, AuthPolicy};
pub use shared_secret::{AuthConfig, SharedSecretPolicy};

#[cfg(test)]
pub use policy::MockAuthPolicy;
