//! Outgoing email message

use std::path::PathBuf;

use crate::domain::mail::value_objects::email_address::EmailAddress;

/// A resume file attached to an outgoing email
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResumeAttachment {
    /// The filename shown to the recipient
    pub filename: String,

    /// The file to read the attachment body from
    pub path: PathBuf,
}

impl ResumeAttachment {
    /// Attach the file at `path` under the conventional recipient-facing
    /// name.
    pub fn new(path: PathBuf) -> Self {
        Self {
            filename: "Resume.pdf".to_string(),
            path,
        }
    }
}

/// A fully rendered email ready for the transport
#[derive(Clone, Debug)]
pub struct OutgoingEmail {
    /// The recipient of the email
    pub to: EmailAddress,

    /// The subject of the email
    pub subject: String,

    /// The HTML body of the email
    pub html: String,

    /// The plain text body of the email
    pub plain: String,

    /// The resume to attach, when one was selected
    pub attachment: Option<ResumeAttachment>,
}
