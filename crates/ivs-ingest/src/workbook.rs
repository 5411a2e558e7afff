//! Workbook supplier tables (first worksheet).

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use ivs_model::{RawTable, RawValue};

use crate::error::{IngestError, Result};

/// Workbook extensions accepted for supplier tables.
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];

/// Read the first worksheet; its first row is the header row.
pub fn read_workbook_table(path: &Path) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::EmptyWorkbook {
            path: path.to_path_buf(),
        })?
        .map_err(|e| IngestError::Workbook {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    };
    let headers: Vec<String> = header_row.iter().map(header_text).collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }

    let records = rows
        .map(|row| row.iter().map(cell_to_raw).collect())
        .collect();
    Ok(RawTable::from_rows(headers, records))
}

fn header_text(cell: &Data) -> String {
    match cell_to_raw(cell) {
        RawValue::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Workbook cells keep their numeric type.
pub fn cell_to_raw(cell: &Data) -> RawValue {
    match cell {
        Data::Empty => RawValue::Empty,
        Data::String(s) => RawValue::Text(s.clone()),
        Data::Float(f) => RawValue::Number(*f),
        Data::Int(i) => RawValue::Number(*i as f64),
        Data::Bool(b) => RawValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::Error(_) => RawValue::Empty,
        other => RawValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_cell_to_raw() {
        assert_eq!(cell_to_raw(&Data::Empty), RawValue::Empty);
        assert_eq!(cell_to_raw(&Data::Float(0.5)), RawValue::Number(0.5));
        assert_eq!(cell_to_raw(&Data::Int(3)), RawValue::Number(3.0));
        assert_eq!(cell_to_raw(&Data::String("VS1".into())), RawValue::from("VS1"));
        assert_eq!(
            cell_to_raw(&Data::Error(calamine::CellErrorType::NA)),
            RawValue::Empty
        );
    }

    #[test]
    fn test_header_text_from_number() {
        assert_eq!(header_text(&Data::Float(1.0)), "1");
        assert_eq!(header_text(&Data::Empty), "");
    }

    #[test]
    fn test_corrupt_workbook() {
        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        file.write_all(b"not a zip archive").unwrap();
        let err = read_workbook_table(file.path()).unwrap_err();
        assert!(matches!(err, IngestError::Workbook { .. }));
    }
}
