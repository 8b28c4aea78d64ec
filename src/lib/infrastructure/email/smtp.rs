//! SMTP mail transport implementation

use std::fmt;

use anyhow::Result;
use axum::async_trait;
use clap::Parser;
use lettre::{
    message::{header::ContentType, Attachment, Body, MultiPart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    Message, SmtpTransport, Transport,
};

use crate::domain::mail::mailer::{EmailError, Mailer, OutgoingEmail};

/// SMTP configuration
#[derive(Clone, Default, Debug, Parser)]
pub struct SMTPConfig {
    /// The SMTP host
    #[clap(long, env = "SMTP_HOST")]
    pub host: String,

    /// The SMTP port
    #[clap(long, env = "SMTP_PORT")]
    pub port: u16,

    /// The SMTP username
    #[clap(long, env = "SMTP_USER")]
    pub username: String,

    /// The SMTP password
    #[clap(long, env = "SMTP_PASSWORD")]
    pub password: String,

    /// The sender mailbox, e.g. `Jane Doe <jane@example.com>`
    #[clap(long, env = "SMTP_SENDER")]
    pub sender: String,

    /// Verify the TLS certificate
    #[clap(long, env = "SMTP_VERIFY_TLS", default_value = "true")]
    pub verify_tls: bool,

    /// Enable STARTTLS (TLS upgrade on connection)
    #[clap(long, env = "SMTP_STARTTLS", default_value = "true")]
    pub starttls: bool,
}

/// SMTP mailer.
///
/// The transport is built once at startup and shared by every send.
#[derive(Clone)]
pub struct SMTPMailer {
    config: SMTPConfig,
    transport: SmtpTransport,
}

impl SMTPMailer {
    /// Create a new SMTP mailer with its transport
    pub fn new(config: SMTPConfig) -> Result<Self> {
        let creds = Credentials::new(config.username.clone(), config.password.clone());

        let relay = if config.starttls {
            SmtpTransport::starttls_relay(&config.host)?
        } else {
            SmtpTransport::relay(&config.host)?
        };

        let transport = relay
            .credentials(creds)
            .port(config.port)
            .tls(Tls::Opportunistic(
                TlsParameters::builder(config.host.to_string())
                    .dangerous_accept_invalid_certs(!config.verify_tls)
                    .build()?,
            ))
            .build();

        Ok(Self { config, transport })
    }
}

impl fmt::Debug for SMTPMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SMTPMailer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Mailer for SMTPMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
        let builder = Message::builder()
            .from(self.config.sender.parse()?)
            .to(email.to.to_string().parse()?)
            .subject(email.subject.clone());

        let alternative =
            MultiPart::alternative_plain_html(email.plain.clone(), email.html.clone());

        let message = match &email.attachment {
            Some(resume) => {
                let content = tokio::fs::read(&resume.path)
                    .await
                    .map_err(EmailError::AttachmentUnreadable)?;
                let content_type = ContentType::parse("application/pdf")
                    .map_err(|err| EmailError::UnknownError(err.into()))?;

                builder.multipart(
                    MultiPart::mixed().multipart(alternative).singlepart(
                        Attachment::new(resume.filename.clone())
                            .body(Body::new(content), content_type),
                    ),
                )?
            }
            None => builder.multipart(alternative)?,
        };

        match self.transport.send(&message) {
            Ok(_) => Ok(()),
            Err(err) => Err(EmailError::UnknownError(err.into())),
        }
    }
}
