//! Outreach email template

use askama::Template;
use uuid::Uuid;

/// The personalized outreach message body.
///
/// User-supplied fields are HTML-escaped by askama. The tracking tag is
/// the one field emitted raw; it is built internally, never from user
/// input.
#[derive(Debug, Template)]
#[template(path = "emails/outreach.html")]
pub struct OutreachEmailTemplate {
    /// The recipient's name
    pub name: String,

    /// The role being applied for
    pub job_role: String,

    /// The company phrase, omitted entirely when unknown
    pub company_name: Option<String>,

    /// The sender's display name for the signature
    pub sender_name: String,

    /// The sender's phone number for the signature
    pub sender_phone: Option<String>,

    /// The sender's contact address for the signature
    pub sender_email: String,

    /// A pre-built tracking pixel tag, appended verbatim
    pub tracking_tag: Option<String>,
}

impl OutreachEmailTemplate {
    /// Renders the plain text alternative of the email
    pub fn render_plain(&self) -> String {
        let company = match &self.company_name {
            Some(company) => format!(" at {company}"),
            None => String::new(),
        };

        let phone = match &self.sender_phone {
            Some(phone) => format!("{phone}\n"),
            None => String::new(),
        };

        format!(
            "Hi {name},\n\n\
             I hope you're doing well!\n\n\
             I'm reaching out to express my interest in the {job_role} role{company}. \
             I bring 2+ years of hands-on experience and have successfully delivered \
             8+ projects in this domain.\n\n\
             I'd love the opportunity to contribute my skills and energy to your team.\n\n\
             Best regards,\n{sender_name}\n{phone}{sender_email}\n",
            name = self.name,
            job_role = self.job_role,
            sender_name = self.sender_name,
            sender_email = self.sender_email,
        )
    }
}

/// Builds the 1×1 tracking pixel tag embedding a delivery log entry id.
pub fn tracking_pixel_tag(base_url: &str, id: &Uuid) -> String {
    format!(
        r#"<img src="{base_url}/api/v1/mail/view/{id}" width="1" height="1" alt=""/>"#
    )
}
