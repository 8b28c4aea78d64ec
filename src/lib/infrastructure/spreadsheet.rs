//! Spreadsheet adapters

pub mod excel;
