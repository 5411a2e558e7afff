//! CSV supplier tables.

use std::path::Path;

use ivs_common::column_to_raw;
use ivs_model::{RawColumn, RawTable};
use polars::prelude::*;

use crate::error::{IngestError, Result};
use crate::file::open_error;

/// Read the header row exactly as written, duplicates included.
///
/// Polars renames duplicate headers, but reconciliation needs the supplier's
/// own text, so the header line is parsed separately.
pub fn read_csv_headers(path: &Path) -> Result<Vec<String>> {
    let file = std::fs::File::open(path).map_err(|e| open_error(path, e))?;
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut record = ::csv::StringRecord::new();
    let has_row = reader
        .read_record(&mut record)
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    if !has_row {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let headers: Vec<String> = record
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }
    Ok(headers)
}

/// Read a CSV supplier table with every column as text.
pub fn read_csv_table(path: &Path) -> Result<RawTable> {
    let headers = read_csv_headers(path)?;

    // Schema inference is disabled so cells like "0.50" keep their formatting
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if df.width() != headers.len() {
        tracing::warn!(
            path = %path.display(),
            parsed = headers.len(),
            loaded = df.width(),
            "Header count differs from loaded columns, using loaded column names"
        );
    }

    let columns = df
        .get_columns()
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let header = headers
                .get(idx)
                .filter(|_| df.width() == headers.len())
                .cloned()
                .unwrap_or_else(|| column.name().to_string());
            RawColumn::new(header, column_to_raw(column))
        })
        .collect();

    Ok(RawTable::new(columns))
}
