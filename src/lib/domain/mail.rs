//! Outreach mail domain

pub mod delivery_log;
pub mod dispatch;
pub mod emails;
pub mod mailer;
pub mod recipients;
pub mod resumes;
pub mod spreadsheet;
pub mod value_objects;
