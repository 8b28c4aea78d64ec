//! Delivery log

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::mail::value_objects::email_address::EmailAddress;

pub mod errors;
pub mod repository;

pub use repository::DeliveryLogRepository;

#[cfg(test)]
pub use repository::MockDeliveryLogRepository;

/// A durable record of one outbound-email attempt.
///
/// Created before the transport call so that every attempt is recorded
/// exactly once; `is_sent` is the only field distinguishing success from
/// failure. Entries are never deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeliveryLogEntry {
    /// The entry id, assigned at creation
    pub id: Uuid,

    /// The recipient address snapshot
    #[schema(example = "hr@example.com")]
    pub to: String,

    /// The subject snapshot
    #[schema(example = "Application for Java Developer")]
    pub subject: String,

    /// The recipient name snapshot
    #[schema(example = "Priya")]
    pub name: String,

    /// The body snapshot
    #[schema(example = "Interest in Java Developer")]
    pub body: String,

    /// Whether the transport accepted the message
    pub is_sent: bool,

    /// Whether the tracking pixel has been fetched
    pub viewed: bool,

    /// When the attempt was recorded; immutable history sort key
    pub created_at: DateTime<Utc>,
}

/// The fields persisted when a delivery log entry is created.
///
/// `is_sent` and `viewed` always start out false.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewDeliveryLogEntry {
    /// The entry id, chosen by the dispatcher so it can be embedded in the
    /// tracking pixel URL
    pub id: Uuid,

    /// The recipient address
    pub to: EmailAddress,

    /// The recipient name
    pub name: String,

    /// The subject line
    pub subject: String,

    /// The body snapshot
    pub body: String,
}

/// One page of delivery history
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct DeliveryHistoryPage {
    /// The page number, 1-based
    #[schema(example = 1)]
    pub page: i64,

    /// The page size
    #[schema(example = 10)]
    pub limit: i64,

    /// The total number of pages
    #[schema(example = 4)]
    pub total_pages: i64,

    /// The total number of delivery log entries
    #[schema(example = 37)]
    pub total_records: i64,

    /// The entries on this page, newest first
    pub data: Vec<DeliveryLogEntry>,
}
