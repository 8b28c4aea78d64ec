//! Outreach dispatch service

use std::io;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

#[cfg(test)]
use mockall::mock;

use crate::domain::mail::{
    delivery_log::{
        errors::{ListDeliveryLogError, UpdateLogEntryError},
        DeliveryHistoryPage, DeliveryLogRepository, NewDeliveryLogEntry,
    },
    dispatch::{
        errors::{BulkSendError, SendError},
        BulkSummary, OutreachConfig, RecipientOutcome,
    },
    emails::outreach::{tracking_pixel_tag, OutreachEmailTemplate},
    mailer::{Mailer, OutgoingEmail, ResumeAttachment},
    recipients::Recipient,
    resumes::ResumeSelector,
    spreadsheet::SpreadsheetReader,
    value_objects::email_address::EmailAddress,
};

use askama::Template;

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;

/// Outreach orchestration service
#[async_trait]
pub trait OutreachService: Clone + Send + Sync + 'static {
    /// Dispatch to a single recipient.
    ///
    /// # Returns
    /// A [`Result`] with the normalized recipient address on success, or a
    /// [`SendError`] carrying the transport's reason on failure.
    async fn send_single(&self, recipient: &Recipient) -> Result<EmailAddress, SendError>;

    /// Dispatch to every valid row of an uploaded spreadsheet.
    ///
    /// All per-recipient sends run concurrently; the uploaded file is
    /// removed once they have all completed, whatever their outcome.
    async fn send_bulk(&self, spreadsheet: &Path) -> Result<BulkSummary, BulkSendError>;

    /// Record that a message was opened. Unknown ids are ignored.
    async fn mark_viewed(&self, id: &Uuid) -> Result<(), UpdateLogEntryError>;

    /// Read one page of delivery history, newest first.
    ///
    /// Non-positive `page` and `limit` fall back to 1 and 10.
    async fn history(&self, page: i64, limit: i64)
        -> Result<DeliveryHistoryPage, ListDeliveryLogError>;
}

#[cfg(test)]
mock! {
    pub OutreachService {}

    impl Clone for OutreachService {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl OutreachService for OutreachService {
        async fn send_single(&self, recipient: &Recipient) -> Result<EmailAddress, SendError>;
        async fn send_bulk(&self, spreadsheet: &Path) -> Result<BulkSummary, BulkSendError>;
        async fn mark_viewed(&self, id: &Uuid) -> Result<(), UpdateLogEntryError>;
        async fn history(&self, page: i64, limit: i64) -> Result<DeliveryHistoryPage, ListDeliveryLogError>;
    }
}

/// Outreach service implementation
#[derive(Debug, Clone)]
pub struct OutreachServiceImpl<R, M, S>
where
    R: DeliveryLogRepository,
    M: Mailer,
    S: SpreadsheetReader,
{
    repo: Arc<R>,
    mailer: Arc<M>,
    spreadsheets: Arc<S>,
    resumes: ResumeSelector,
    config: OutreachConfig,
}

impl<R, M, S> OutreachServiceImpl<R, M, S>
where
    R: DeliveryLogRepository,
    M: Mailer,
    S: SpreadsheetReader,
{
    /// Create a new outreach service
    pub fn new(
        repo: Arc<R>,
        mailer: Arc<M>,
        spreadsheets: Arc<S>,
        resumes: ResumeSelector,
        config: OutreachConfig,
    ) -> Self {
        Self {
            repo,
            mailer,
            spreadsheets,
            resumes,
            config,
        }
    }

    /// The shared per-recipient procedure.
    ///
    /// A delivery log entry is created before the transport call so every
    /// attempt is recorded exactly once; `is_sent` is persisted afterwards
    /// to reflect the outcome.
    async fn dispatch(&self, recipient: &Recipient) -> Result<EmailAddress, SendError> {
        if recipient.email.trim().is_empty() {
            return Err(SendError::MissingEmail);
        }

        if recipient.job_role.trim().is_empty() {
            return Err(SendError::MissingJobRole);
        }

        let to = EmailAddress::new(&recipient.email)?;
        let id = Uuid::now_v7();

        self.repo
            .create(&NewDeliveryLogEntry {
                id,
                to: to.clone(),
                name: recipient.name.clone(),
                subject: recipient.subject(),
                body: recipient.body_summary(),
            })
            .await?;

        let template = OutreachEmailTemplate {
            name: recipient.name.clone(),
            job_role: recipient.job_role.clone(),
            company_name: recipient.company_name.clone(),
            sender_name: self.config.sender_name.clone(),
            sender_phone: self.config.sender_phone.clone(),
            sender_email: self.config.sender_email.clone(),
            tracking_tag: Some(tracking_pixel_tag(&self.config.base_url, &id)),
        };

        let email = OutgoingEmail {
            to: to.clone(),
            subject: recipient.subject(),
            html: template.render()?,
            plain: template.render_plain(),
            attachment: self
                .resumes
                .select(&recipient.job_role)
                .map(ResumeAttachment::new),
        };

        match self.mailer.send(&email).await {
            Ok(()) => {
                self.repo.set_sent(&id, true).await?;
                Ok(to)
            }
            Err(err) => {
                // The entry was created unsent; persisting confirms it.
                if let Err(update_err) = self.repo.set_sent(&id, false).await {
                    warn!(%id, %update_err, "could not persist failed send outcome");
                }

                Err(SendError::TransportFailure(err.to_string()))
            }
        }
    }
}

#[async_trait]
impl<R, M, S> OutreachService for OutreachServiceImpl<R, M, S>
where
    R: DeliveryLogRepository,
    M: Mailer,
    S: SpreadsheetReader,
{
    async fn send_single(&self, recipient: &Recipient) -> Result<EmailAddress, SendError> {
        self.dispatch(recipient).await
    }

    async fn send_bulk(&self, spreadsheet: &Path) -> Result<BulkSummary, BulkSendError> {
        let rows = self.spreadsheets.read(spreadsheet)?;

        let recipients: Vec<Recipient> = rows
            .into_iter()
            .filter(|row| !row.email.trim().is_empty())
            .map(Recipient::from)
            .collect();

        if recipients.is_empty() {
            return Err(BulkSendError::NoValidRecipients);
        }

        let attempted = recipients.len();
        let mut handles = Vec::with_capacity(attempted);

        for recipient in recipients {
            let service = self.clone();

            handles.push(tokio::spawn(async move {
                let fallback_email = recipient.email.clone();

                match service.dispatch(&recipient).await {
                    Ok(to) => RecipientOutcome {
                        email: to.to_string(),
                        success: true,
                        reason: None,
                    },
                    Err(err) => RecipientOutcome {
                        email: fallback_email,
                        success: false,
                        reason: Some(err.to_string()),
                    },
                }
            }));
        }

        let mut outcomes = Vec::with_capacity(attempted);

        for handle in handles {
            match handle.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => outcomes.push(RecipientOutcome {
                    email: String::new(),
                    success: false,
                    reason: Some(err.to_string()),
                }),
            }
        }

        remove_uploaded_file(spreadsheet).await;

        let succeeded = outcomes.iter().filter(|outcome| outcome.success).count();

        Ok(BulkSummary {
            attempted,
            succeeded,
            failed: attempted - succeeded,
            outcomes,
        })
    }

    async fn mark_viewed(&self, id: &Uuid) -> Result<(), UpdateLogEntryError> {
        match self.repo.mark_viewed(id).await {
            Ok(()) => Ok(()),
            Err(UpdateLogEntryError::EntryNotFound(id)) => {
                debug!(%id, "tracking pixel fetched for unknown delivery log entry");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    async fn history(
        &self,
        page: i64,
        limit: i64,
    ) -> Result<DeliveryHistoryPage, ListDeliveryLogError> {
        let page = if page < 1 { DEFAULT_PAGE } else { page };
        let limit = if limit < 1 { DEFAULT_LIMIT } else { limit };
        let skip = (page - 1) * limit;

        let (data, total_records) =
            tokio::try_join!(self.repo.list(skip, limit), self.repo.count())?;

        Ok(DeliveryHistoryPage {
            page,
            limit,
            total_pages: (total_records + limit - 1) / limit,
            total_records,
            data,
        })
    }
}

/// Deletes an uploaded spreadsheet once processing is over.
///
/// Deletion failures are logged, never surfaced; the summary of the batch
/// matters more than the cleanup.
async fn remove_uploaded_file(path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => debug!(path = %path.display(), "removed uploaded spreadsheet"),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "uploaded spreadsheet already removed")
        }
        Err(err) => warn!(path = %path.display(), %err, "failed to remove uploaded spreadsheet"),
    }
}
