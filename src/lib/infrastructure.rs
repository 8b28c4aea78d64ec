//! Infrastructure adapters

pub mod database;
pub mod email;
pub mod http;
pub mod spreadsheet;
pub mod uploads;
