//! Excel spreadsheet reader

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::domain::mail::spreadsheet::{RecipientRow, SpreadsheetError, SpreadsheetReader};

const NAME_HEADER: &str = "Name";
const EMAIL_HEADER: &str = "Email";
const ROLE_HEADER: &str = "Role";
const COMPANY_HEADER: &str = "Company Name";

/// Reads recipient rows from the first worksheet of an Excel workbook.
#[derive(Clone, Debug, Default)]
pub struct ExcelReader;

impl ExcelReader {
    /// Create a new Excel reader
    pub fn new() -> Self {
        Self
    }
}

impl SpreadsheetReader for ExcelReader {
    #[mutants::skip]
    fn read(&self, path: &Path) -> Result<Vec<RecipientRow>, SpreadsheetError> {
        let mut workbook =
            open_workbook_auto(path).map_err(|err| SpreadsheetError::Unreadable(err.into()))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or(SpreadsheetError::NoWorksheet)?
            .map_err(|err| SpreadsheetError::Unreadable(err.into()))?;

        Ok(collect_rows(range.rows()))
    }
}

/// Maps a header row plus data rows to recipient rows, dropping rows
/// without an email value.
fn collect_rows<'a>(mut rows: impl Iterator<Item = &'a [Data]>) -> Vec<RecipientRow> {
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(normalize_header).collect(),
        None => return Vec::new(),
    };

    let mut recipients = Vec::new();

    for row in rows {
        let mut name = None;
        let mut email = None;
        let mut job_role = None;
        let mut company_name = None;

        for (idx, cell) in row.iter().enumerate() {
            let Some(header) = headers.get(idx) else {
                continue;
            };

            match header.as_str() {
                NAME_HEADER => name = cell_text(cell),
                EMAIL_HEADER => email = cell_text(cell),
                ROLE_HEADER => job_role = cell_text(cell),
                COMPANY_HEADER => company_name = cell_text(cell),
                _ => {}
            }
        }

        if let Some(email) = email {
            recipients.push(RecipientRow {
                name,
                email,
                job_role,
                company_name,
            });
        }
    }

    recipients
}

/// Trims a header cell and strips combining diacritical marks, so an
/// accented header still matches its column name.
fn normalize_header(cell: &Data) -> String {
    cell_text(cell)
        .unwrap_or_default()
        .chars()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(value) => {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Data::Int(value) => Some(value.to_string()),
        Data::Float(value) => Some(value.to_string()),
        Data::Bool(value) => Some(value.to_string()),
        Data::DateTime(value) => Some(value.as_f64().to_string()),
        Data::DateTimeIso(value) | Data::DurationIso(value) => Some(value.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(value: &str) -> Data {
        Data::String(value.to_string())
    }

    #[test]
    fn test_rows_without_an_email_are_dropped() {
        let rows: Vec<Vec<Data>> = vec![
            vec![cell("Name"), cell("Email"), cell("Role")],
            vec![cell("Priya"), cell("a@b.com"), cell("Java Developer")],
            vec![cell("Ravi"), Data::Empty, cell("Node Developer")],
        ];

        let recipients = collect_rows(rows.iter().map(Vec::as_slice));

        assert_eq!(recipients.len(), 1);
        assert_eq!(recipients[0].email, "a@b.com");
        assert_eq!(recipients[0].job_role.as_deref(), Some("Java Developer"));
    }

    #[test]
    fn test_headers_are_trimmed_and_accent_stripped() {
        // "E" followed by a combining acute accent.
        let rows: Vec<Vec<Data>> = vec![
            vec![cell("  E\u{0301}mail  ")],
            vec![cell("a@b.com")],
        ];

        let recipients = collect_rows(rows.iter().map(Vec::as_slice));

        assert_eq!(recipients.len(), 1);
        assert_eq!(recipients[0].email, "a@b.com");
    }

    #[test]
    fn test_cell_values_are_trimmed() {
        let rows: Vec<Vec<Data>> = vec![
            vec![cell("Name"), cell("Email")],
            vec![cell("  Priya  "), cell("  a@b.com  ")],
        ];

        let recipients = collect_rows(rows.iter().map(Vec::as_slice));

        assert_eq!(recipients[0].name.as_deref(), Some("Priya"));
        assert_eq!(recipients[0].email, "a@b.com");
    }

    #[test]
    fn test_an_empty_sheet_yields_no_rows() {
        let rows: Vec<Vec<Data>> = Vec::new();

        assert!(collect_rows(rows.iter().map(Vec::as_slice)).is_empty());
    }

    #[test]
    fn test_unknown_columns_are_ignored() {
        let rows: Vec<Vec<Data>> = vec![
            vec![cell("Email"), cell("LinkedIn")],
            vec![cell("a@b.com"), cell("linkedin.com/in/priya")],
        ];

        let recipients = collect_rows(rows.iter().map(Vec::as_slice));

        assert_eq!(recipients.len(), 1);
        assert_eq!(recipients[0].company_name, None);
    }
}
