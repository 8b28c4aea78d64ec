//! Dispatch orchestration

use std::fmt;
use std::path::PathBuf;

use clap::Parser;

pub mod errors;
pub mod service;

pub use service::{OutreachService, OutreachServiceImpl};

#[cfg(test)]
pub use service::MockOutreachService;

/// Dispatch configuration
#[derive(Clone, Debug, Parser)]
pub struct OutreachConfig {
    /// The public base URL tracking pixel links point at
    #[arg(long, env = "BASE_URL", default_value = "http://localhost:3000")]
    pub base_url: String,

    /// The sender name shown in the signature
    #[arg(long, env = "SENDER_NAME")]
    pub sender_name: String,

    /// The sender phone number shown in the signature
    #[arg(long, env = "SENDER_PHONE")]
    pub sender_phone: Option<String>,

    /// The sender contact address shown in the signature
    #[arg(long, env = "SENDER_EMAIL")]
    pub sender_email: String,

    /// The directory resume files are selected from
    #[arg(long, env = "RESUME_DIR", default_value = "resume")]
    pub resume_dir: PathBuf,
}

/// The outcome of one recipient's send within a batch.
///
/// The failure reason lives only in this transient summary; it is never
/// persisted on the delivery log entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecipientOutcome {
    /// The recipient address
    pub email: String,

    /// Whether the transport accepted the message
    pub success: bool,

    /// The failure reason, when the send failed
    pub reason: Option<String>,
}

/// Aggregate result of a bulk send
#[derive(Clone, Debug)]
pub struct BulkSummary {
    /// How many filtered rows were attempted
    pub attempted: usize,

    /// How many sends the transport accepted
    pub succeeded: usize,

    /// How many sends failed
    pub failed: usize,

    /// Per-recipient outcomes, in completion order
    pub outcomes: Vec<RecipientOutcome>,
}

impl fmt::Display for BulkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Successfully sent {} out of {} emails. Failed: {}",
            self.succeeded, self.attempted, self.failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_summary_message() {
        let summary = BulkSummary {
            attempted: 3,
            succeeded: 2,
            failed: 1,
            outcomes: Vec::new(),
        };

        assert_eq!(
            summary.to_string(),
            "Successfully sent 2 out of 3 emails. Failed: 1"
        );
    }
}
