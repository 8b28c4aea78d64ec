//! Dispatch errors

use anyhow::anyhow;
use thiserror::Error;

use crate::domain::mail::{
    delivery_log::errors::{CreateLogEntryError, UpdateLogEntryError},
    spreadsheet::SpreadsheetError,
    value_objects::email_address::EmailAddressError,
};

/// Errors that can occur when dispatching to one recipient
#[derive(Debug, Error)]
pub enum SendError {
    /// No email address was supplied
    #[error("Missing required field: email")]
    MissingEmail,

    /// No job role was supplied
    #[error("Missing required field: jobRole")]
    MissingJobRole,

    /// The email address does not look like an address
    #[error("Please provide a valid email address")]
    InvalidEmail,

    /// The transport rejected the message; carries the transport's reason
    #[error("Failed to send email: {0}")]
    TransportFailure(String),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

impl From<EmailAddressError> for SendError {
    fn from(err: EmailAddressError) -> Self {
        match err {
            EmailAddressError::EmptyEmailAddress => SendError::MissingEmail,
            EmailAddressError::InvalidEmailAddress => SendError::InvalidEmail,
        }
    }
}

impl From<CreateLogEntryError> for SendError {
    fn from(err: CreateLogEntryError) -> Self {
        match err {
            CreateLogEntryError::UnknownError(err) => SendError::UnknownError(err),
        }
    }
}

impl From<UpdateLogEntryError> for SendError {
    fn from(err: UpdateLogEntryError) -> Self {
        match err {
            UpdateLogEntryError::EntryNotFound(id) => {
                SendError::UnknownError(anyhow!("delivery log entry {id} vanished mid-send"))
            }
            UpdateLogEntryError::UnknownError(err) => SendError::UnknownError(err),
        }
    }
}

impl From<askama::Error> for SendError {
    fn from(err: askama::Error) -> Self {
        SendError::UnknownError(err.into())
    }
}

/// Errors that can occur when processing a bulk upload
#[derive(Debug, Error)]
pub enum BulkSendError {
    /// Every row was missing an email address
    #[error("No valid emails found in the uploaded file")]
    NoValidRecipients,

    /// The uploaded file could not be parsed
    #[error(transparent)]
    Spreadsheet(#[from] SpreadsheetError),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}
