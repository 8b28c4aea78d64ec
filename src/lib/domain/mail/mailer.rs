//! Mail transport seam

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

pub mod errors;
pub mod message;

pub use errors::EmailError;
pub use message::{OutgoingEmail, ResumeAttachment};

/// Outbound mail transport.
///
/// A single implementation instance is constructed at startup and shared
/// by every dispatch.
#[async_trait]
pub trait Mailer: Clone + Send + Sync + 'static {
    /// Send one email.
    ///
    /// # Returns
    /// A [`Result`] indicating transport success or failure. Failures are
    /// never retried by callers.
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError>;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    impl Clone for Mailer {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl Mailer for Mailer {
        async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError>;
    }
}
