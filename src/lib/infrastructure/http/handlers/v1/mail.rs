//! Mail handlers

pub mod history;
pub mod send_bulk;
pub mod send_single;
pub mod track_view;
