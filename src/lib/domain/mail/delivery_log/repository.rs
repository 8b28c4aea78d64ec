//! Delivery log repository

use async_trait::async_trait;
use uuid::Uuid;

#[cfg(test)]
use mockall::mock;

use crate::domain::mail::delivery_log::{
    errors::{CreateLogEntryError, ListDeliveryLogError, UpdateLogEntryError},
    DeliveryLogEntry, NewDeliveryLogEntry,
};

/// Durable storage for delivery log entries.
///
/// Implementations must allow concurrent creates and per-entry atomic
/// updates; bulk dispatch writes from many tasks at once.
#[async_trait]
pub trait DeliveryLogRepository: Clone + Send + Sync + 'static {
    /// Record a new attempt with `is_sent` and `viewed` false.
    async fn create(&self, entry: &NewDeliveryLogEntry) -> Result<Uuid, CreateLogEntryError>;

    /// Persist the transport outcome for an entry.
    async fn set_sent(&self, id: &Uuid, is_sent: bool) -> Result<(), UpdateLogEntryError>;

    /// Flip the viewed flag for an entry. Repeated calls are harmless.
    async fn mark_viewed(&self, id: &Uuid) -> Result<(), UpdateLogEntryError>;

    /// Fetch a window of entries ordered by creation time descending.
    async fn list(&self, skip: i64, limit: i64)
        -> Result<Vec<DeliveryLogEntry>, ListDeliveryLogError>;

    /// Count all entries.
    async fn count(&self) -> Result<i64, ListDeliveryLogError>;
}

#[cfg(test)]
mock! {
    pub DeliveryLogRepository {}

    impl Clone for DeliveryLogRepository {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl DeliveryLogRepository for DeliveryLogRepository {
        async fn create(&self, entry: &NewDeliveryLogEntry) -> Result<Uuid, CreateLogEntryError>;
        async fn set_sent(&self, id: &Uuid, is_sent: bool) -> Result<(), UpdateLogEntryError>;
        async fn mark_viewed(&self, id: &Uuid) -> Result<(), UpdateLogEntryError>;
        async fn list(&self, skip: i64, limit: i64) -> Result<Vec<DeliveryLogEntry>, ListDeliveryLogError>;
        async fn count(&self) -> Result<i64, ListDeliveryLogError>;
    }
}
