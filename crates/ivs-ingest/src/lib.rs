//! Supplier table ingestion.
//!
//! Loads a supplier inventory file into a [`RawTable`]:
//!
//! - **CSV**: read with Polars, every column as text so raw formatting survives
//! - **Workbooks** (`.xlsx`, `.xlsm`, `.xls`, `.xlsb`, `.ods`): first worksheet via calamine,
//!   numeric cells stay numeric
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use ivs_ingest::load_supplier_table;
//!
//! let table = load_supplier_table(Path::new("stock.csv"))?;
//! println!("{} rows", table.row_count());
//! ```

mod csv_reader;
mod error;
mod file;
mod workbook;

use std::path::Path;
use std::time::Instant;

use ivs_model::RawTable;

// === Error Types ===
pub use error::{IngestError, Result};

// === Readers ===
pub use csv_reader::{read_csv_headers, read_csv_table};
pub use file::{MAX_FILE_SIZE, check_file_size, check_file_size_with_limit, validate_encoding};
pub use workbook::{WORKBOOK_EXTENSIONS, cell_to_raw, read_workbook_table};

/// Supported supplier table formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Workbook,
}

impl TableFormat {
    /// Detect the format from the file extension.
    pub fn detect(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else if WORKBOOK_EXTENSIONS
            .iter()
            .any(|w| w.eq_ignore_ascii_case(ext))
        {
            Some(Self::Workbook)
        } else {
            None
        }
    }
}

/// Load a supplier table, checking size and encoding first.
pub fn load_supplier_table(path: &Path) -> Result<RawTable> {
    let start = Instant::now();
    let format = TableFormat::detect(path).ok_or_else(|| IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    check_file_size(path)?;
    let table = match format {
        TableFormat::Csv => {
            validate_encoding(path)?;
            read_csv_table(path)?
        }
        TableFormat::Workbook => read_workbook_table(path)?,
    };

    tracing::info!(
        path = %path.display(),
        format = ?format,
        rows = table.row_count(),
        columns = table.columns().len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Loaded supplier table"
    );
    Ok(table)
}
