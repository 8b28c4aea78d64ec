//! Email templates

pub mod outreach;
