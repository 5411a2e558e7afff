//! Error types for rule-table loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading a rule table.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RulesError {
    /// Rule table path does not exist.
    #[error("rule table not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Neither a directory nor a supported workbook extension.
    #[error("unsupported rule table format: {path} (expected .xlsx, .xlsm, .xls, .ods or a directory)")]
    UnsupportedFormat { path: PathBuf },

    /// Workbook could not be opened or a sheet could not be read.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// Required sheet (or sheet file) is missing.
    #[error("sheet '{sheet}' not found in {path}")]
    SheetNotFound { path: PathBuf, sheet: String },

    /// Sheet has no header row.
    #[error("sheet '{sheet}' in {path} is empty")]
    EmptySheet { path: PathBuf, sheet: String },

    /// Required header is missing from a sheet.
    #[error("required column '{column}' not found in sheet '{sheet}' of {path}")]
    MissingColumn {
        path: PathBuf,
        sheet: String,
        column: &'static str,
    },

    /// Failed to read or parse a rule CSV file.
    #[error("failed to read CSV {path}: {source}")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Result type for rule-table loading.
pub type Result<T> = std::result::Result<T, RulesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RulesError::MissingColumn {
            path: PathBuf::from("headers.xlsx"),
            sheet: "Values".to_string(),
            column: "Base Value",
        };
        assert_eq!(
            err.to_string(),
            "required column 'Base Value' not found in sheet 'Values' of headers.xlsx"
        );
    }

    #[test]
    fn test_sheet_not_found_names_sheet() {
        let err = RulesError::SheetNotFound {
            path: PathBuf::from("rules"),
            sheet: "Columns".to_string(),
        };
        assert!(err.to_string().contains("'Columns'"));
    }
}
