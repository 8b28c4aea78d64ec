//! Delivery log errors

use anyhow::anyhow;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when creating a delivery log entry
#[derive(Debug, Error)]
pub enum CreateLogEntryError {
    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

/// Errors that can occur when updating a delivery log entry
#[derive(Debug, Error)]
pub enum UpdateLogEntryError {
    /// No entry matches the id
    #[error("Delivery log entry not found")]
    EntryNotFound(Uuid),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

/// Errors that can occur when listing delivery log entries
#[derive(Debug, Error)]
pub enum ListDeliveryLogError {
    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

impl From<sqlx::Error> for CreateLogEntryError {
    fn from(err: sqlx::Error) -> Self {
        CreateLogEntryError::UnknownError(anyhow!("Unknown database error: {:?}", err))
    }
}

impl From<sqlx::Error> for ListDeliveryLogError {
    fn from(err: sqlx::Error) -> Self {
        ListDeliveryLogError::UnknownError(anyhow!("Unknown database error: {:?}", err))
    }
}
