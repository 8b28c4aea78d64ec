//! Mail transport errors

use lettre::address::AddressError;
use thiserror::Error;

/// Errors raised by the mail transport
#[derive(Debug, Error)]
pub enum EmailError {
    /// An error occurred while sending the email
    #[error("An error occurred while sending the email")]
    SendError,

    /// Invalid email address
    #[error("Invalid email address")]
    InvalidEmail,

    /// The resume attachment could not be read
    #[error("Could not read the resume attachment")]
    AttachmentUnreadable(#[source] std::io::Error),

    /// Unknown error
    #[error(transparent)]
    UnknownError(anyhow::Error),
}

impl From<anyhow::Error> for EmailError {
    fn from(err: anyhow::Error) -> Self {
        EmailError::UnknownError(err)
    }
}

impl From<AddressError> for EmailError {
    fn from(_err: AddressError) -> Self {
        EmailError::InvalidEmail
    }
}

impl From<lettre::error::Error> for EmailError {
    fn from(err: lettre::error::Error) -> Self {
        EmailError::UnknownError(err.into())
    }
}
