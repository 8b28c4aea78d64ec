//! Spreadsheet ingestion seam

use std::path::Path;

use thiserror::Error;

#[cfg(test)]
use mockall::mock;

/// Errors raised while reading an uploaded spreadsheet
#[derive(Debug, Error)]
pub enum SpreadsheetError {
    /// The file could not be opened or parsed
    #[error("Could not read the uploaded spreadsheet")]
    Unreadable(#[source] anyhow::Error),

    /// The workbook contains no worksheet
    #[error("The uploaded spreadsheet has no worksheet")]
    NoWorksheet,
}

/// One raw recipient row, keyed off the normalized header row.
///
/// Readers drop rows without an email value; all other fields stay
/// optional so the dispatcher can apply its defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecipientRow {
    /// The `Name` column, when present
    pub name: Option<String>,

    /// The `Email` column
    pub email: String,

    /// The `Role` column, when present
    pub job_role: Option<String>,

    /// The `Company Name` column, when present
    pub company_name: Option<String>,
}

/// Parses an uploaded tabular file into ordered recipient rows.
pub trait SpreadsheetReader: Clone + Send + Sync + 'static {
    /// Read the first worksheet of the file at `path`.
    fn read(&self, path: &Path) -> Result<Vec<RecipientRow>, SpreadsheetError>;
}

#[cfg(test)]
mock! {
    pub SpreadsheetReader {}

    impl Clone for SpreadsheetReader {
        fn clone(&self) -> Self;
    }

    impl SpreadsheetReader for SpreadsheetReader {
        fn read(&self, path: &Path) -> Result<Vec<RecipientRow>, SpreadsheetError>;
    }
}
