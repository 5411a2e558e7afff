//! Rule sheets as loaded from a workbook or a CSV directory.

use std::fs::File;
use std::path::{Path, PathBuf};

use calamine::{Data, Reader, open_workbook_auto};
use ivs_common::normalize_header;
use ivs_model::format_numeric;

use crate::error::{Result, RulesError};

/// Sheet holding header synonyms.
pub const COLUMNS_SHEET: &str = "Columns";
/// Sheet holding value allow-lists.
pub const VALUES_SHEET: &str = "Values";

/// Workbook extensions accepted for rule tables.
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];

/// A rule sheet with all cells as text.
#[derive(Debug, Clone)]
pub struct RuleSheet {
    pub source: PathBuf,
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RuleSheet {
    /// Index of a required header, matched case- and whitespace-insensitively.
    pub fn required_column(&self, column: &'static str) -> Result<usize> {
        let wanted = normalize_header(column);
        self.headers
            .iter()
            .position(|h| normalize_header(h) == wanted)
            .ok_or_else(|| RulesError::MissingColumn {
                path: self.source.clone(),
                sheet: self.name.clone(),
                column,
            })
    }

    /// Cell text at a row and column, empty when the row is short.
    pub fn cell<'a>(row: &'a [String], idx: usize) -> &'a str {
        row.get(idx).map_or("", String::as_str)
    }
}

/// Where a rule table lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSource {
    /// Workbook with `Columns` and `Values` sheets.
    Workbook(PathBuf),
    /// Directory with `Columns.csv` and `Values.csv`.
    Directory(PathBuf),
}

impl RuleSource {
    /// Classify a path, failing if it is missing or of an unknown kind.
    pub fn detect(path: &Path) -> Result<Self> {
        if path.is_dir() {
            return Ok(Self::Directory(path.to_path_buf()));
        }
        if !path.exists() {
            return Err(RulesError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let is_workbook = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                WORKBOOK_EXTENSIONS
                    .iter()
                    .any(|w| w.eq_ignore_ascii_case(ext))
            });
        if is_workbook {
            Ok(Self::Workbook(path.to_path_buf()))
        } else {
            Err(RulesError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Workbook(p) | Self::Directory(p) => p,
        }
    }

    /// Read one named sheet.
    pub fn read_sheet(&self, sheet: &str) -> Result<RuleSheet> {
        match self {
            Self::Workbook(path) => read_workbook_sheet(path, sheet),
            Self::Directory(dir) => read_csv_sheet(dir, sheet),
        }
    }
}

fn read_workbook_sheet(path: &Path, sheet: &str) -> Result<RuleSheet> {
    let mut workbook = open_workbook_auto(path).map_err(|e| RulesError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let Some(actual) = workbook
        .sheet_names()
        .into_iter()
        .find(|name| name.trim().eq_ignore_ascii_case(sheet))
    else {
        return Err(RulesError::SheetNotFound {
            path: path.to_path_buf(),
            sheet: sheet.to_string(),
        });
    };

    let range = workbook
        .worksheet_range(&actual)
        .map_err(|e| RulesError::Workbook {
            path: path.to_path_buf(),
            message: format!("sheet '{actual}': {e}"),
        })?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(data_to_string).collect::<Vec<_>>());
    let Some(headers) = rows.next() else {
        return Err(RulesError::EmptySheet {
            path: path.to_path_buf(),
            sheet: sheet.to_string(),
        });
    };

    Ok(RuleSheet {
        source: path.to_path_buf(),
        name: sheet.to_string(),
        headers,
        rows: rows.collect(),
    })
}

fn read_csv_sheet(dir: &Path, sheet: &str) -> Result<RuleSheet> {
    let path = dir.join(format!("{sheet}.csv"));
    if !path.is_file() {
        return Err(RulesError::SheetNotFound {
            path: dir.to_path_buf(),
            sheet: sheet.to_string(),
        });
    }
    let file = File::open(&path).map_err(|e| RulesError::CsvRead {
        path: path.clone(),
        source: e.into(),
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| RulesError::CsvRead {
            path: path.clone(),
            source,
        })?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(RulesError::EmptySheet {
            path: path.clone(),
            sheet: sheet.to_string(),
        });
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| RulesError::CsvRead {
            path: path.clone(),
            source,
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RuleSheet {
        source: path,
        name: sheet.to_string(),
        headers,
        rows,
    })
}

fn data_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => format_numeric(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
