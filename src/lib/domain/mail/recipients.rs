//! Recipient records

use crate::domain::mail::spreadsheet::RecipientRow;

/// The greeting name used when a recipient row has no name
pub const DEFAULT_NAME: &str = "there";

/// The role substituted for bulk rows that leave the role column empty
pub const DEFAULT_JOB_ROLE: &str = "Software Developer";

/// One outreach target, produced either from a request body or from a
/// spreadsheet row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recipient {
    /// The recipient's name, used in the greeting
    pub name: String,

    /// The raw recipient email address, validated at dispatch time
    pub email: String,

    /// The job role the message applies for
    pub job_role: String,

    /// The company named in the subject and body, when known
    pub company_name: Option<String>,
}

impl Recipient {
    /// Create a recipient, applying the name default and dropping an empty
    /// company name.
    pub fn new(
        name: Option<String>,
        email: String,
        job_role: String,
        company_name: Option<String>,
    ) -> Self {
        Self {
            name: non_empty(name).unwrap_or_else(|| DEFAULT_NAME.to_string()),
            email,
            job_role,
            company_name: non_empty(company_name),
        }
    }

    /// The subject line for this recipient's message
    pub fn subject(&self) -> String {
        match &self.company_name {
            Some(company) => format!("Application for {} at {}", self.job_role, company),
            None => format!("Application for {}", self.job_role),
        }
    }

    /// The short body snapshot stored on the delivery log entry
    pub fn body_summary(&self) -> String {
        match &self.company_name {
            Some(company) => format!("Interest in {} at {}", self.job_role, company),
            None => format!("Interest in {}", self.job_role),
        }
    }
}

impl From<RecipientRow> for Recipient {
    fn from(row: RecipientRow) -> Self {
        Self::new(
            row.name,
            row.email,
            row.job_role
                .and_then(|role| non_empty(Some(role)))
                .unwrap_or_else(|| DEFAULT_JOB_ROLE.to_string()),
            row.company_name,
        )
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_without_company() {
        let recipient = Recipient::new(
            None,
            "a@b.com".to_string(),
            "Java Developer".to_string(),
            None,
        );

        assert_eq!(recipient.subject(), "Application for Java Developer");
        assert_eq!(recipient.name, DEFAULT_NAME);
    }

    #[test]
    fn test_subject_with_company() {
        let recipient = Recipient::new(
            Some("Priya".to_string()),
            "hr@acme.com".to_string(),
            "React Developer".to_string(),
            Some("Acme".to_string()),
        );

        assert_eq!(recipient.subject(), "Application for React Developer at Acme");
    }

    #[test]
    fn test_blank_company_is_dropped() {
        let recipient = Recipient::new(
            Some("Priya".to_string()),
            "hr@acme.com".to_string(),
            "React Developer".to_string(),
            Some("   ".to_string()),
        );

        assert_eq!(recipient.company_name, None);
        assert_eq!(recipient.subject(), "Application for React Developer");
    }

    #[test]
    fn test_row_defaults() {
        let row = RecipientRow {
            name: None,
            email: "hr@acme.com".to_string(),
            job_role: None,
            company_name: None,
        };

        let recipient = Recipient::from(row);

        assert_eq!(recipient.name, DEFAULT_NAME);
        assert_eq!(recipient.job_role, DEFAULT_JOB_ROLE);
    }
}
