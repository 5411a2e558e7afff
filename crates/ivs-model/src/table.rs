//! Supplier tables before and after schema reconciliation.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::RawValue;

/// Source row number for a 0-based data row index.
///
/// Accounts for the header line and 1-based display, so the first data row
/// is row 2.
#[inline]
pub fn source_row_number(index: usize) -> usize {
    index + 2
}

/// One column of a raw supplier table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawColumn {
    /// Header text exactly as the supplier wrote it.
    pub header: String,
    pub cells: Vec<RawValue>,
}

impl RawColumn {
    pub fn new(header: impl Into<String>, cells: Vec<RawValue>) -> Self {
        Self {
            header: header.into(),
            cells,
        }
    }
}

/// A supplier table in source column order.
///
/// Every column holds exactly `row_count` cells; short columns are padded
/// with [`RawValue::Empty`] on construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    columns: Vec<RawColumn>,
    row_count: usize,
}

impl RawTable {
    /// Build a table, padding every column to the longest one.
    pub fn new(mut columns: Vec<RawColumn>) -> Self {
        let row_count = columns.iter().map(|c| c.cells.len()).max().unwrap_or(0);
        for column in &mut columns {
            column.cells.resize(row_count, RawValue::Empty);
        }
        Self { columns, row_count }
    }

    /// Build a table from a header row and row-major records.
    ///
    /// Records shorter than the header are padded; extra cells are dropped.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<RawValue>>) -> Self {
        let mut columns: Vec<RawColumn> = headers
            .into_iter()
            .map(|h| RawColumn::new(h, Vec::with_capacity(rows.len())))
            .collect();
        for row in &rows {
            for (idx, column) in columns.iter_mut().enumerate() {
                column
                    .cells
                    .push(row.get(idx).cloned().unwrap_or(RawValue::Empty));
            }
        }
        Self {
            columns,
            row_count: rows.len(),
        }
    }

    pub fn columns(&self) -> &[RawColumn] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<RawColumn> {
        self.columns
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.header.as_str())
    }
}

/// Identifier of a canonical field (the normalized header key).
///
/// The vocabulary is defined by the header rule table; the names the engine
/// relies on by default live in [`crate::fields`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalField(String);

impl CanonicalField {
    /// Wrap an already-normalized key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CanonicalField {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for CanonicalField {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Hash, Eq and Ord are derived from the inner String, so they agree with str.
impl Borrow<str> for CanonicalField {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A column mapped to a canonical field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciledColumn {
    pub field: CanonicalField,
    /// Supplier header the cells came from.
    pub source_header: String,
    pub cells: Vec<RawValue>,
}

/// A supplier table keyed by canonical field, plus the columns that did not map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconciledTable {
    columns: Vec<ReconciledColumn>,
    index: HashMap<CanonicalField, usize>,
    unknown: Vec<RawColumn>,
    replaced_headers: Vec<String>,
    row_count: usize,
}

impl ReconciledTable {
    /// Empty table with a fixed row count.
    pub fn with_row_count(row_count: usize) -> Self {
        Self {
            row_count,
            ..Self::default()
        }
    }

    /// Insert a mapped column.
    ///
    /// A later column for an already-mapped field keeps the earlier column's
    /// position but replaces its cells. Returns the replaced source header.
    pub fn insert(
        &mut self,
        field: CanonicalField,
        source_header: String,
        cells: Vec<RawValue>,
    ) -> Option<String> {
        if let Some(&idx) = self.index.get(&field) {
            let column = &mut self.columns[idx];
            let replaced = std::mem::replace(&mut column.source_header, source_header);
            column.cells = cells;
            self.replaced_headers.push(replaced.clone());
            return Some(replaced);
        }
        self.index.insert(field.clone(), self.columns.len());
        self.columns.push(ReconciledColumn {
            field,
            source_header,
            cells,
        });
        None
    }

    /// Retain a column no header rule matched.
    pub fn push_unknown(&mut self, column: RawColumn) {
        self.unknown.push(column);
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Canonical columns in first-seen order.
    pub fn columns(&self) -> &[ReconciledColumn] {
        &self.columns
    }

    pub fn column(&self, field: &str) -> Option<&ReconciledColumn> {
        self.index.get(field).map(|&idx| &self.columns[idx])
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.column(field).is_some()
    }

    /// Cell at a 0-based row index, `None` if the field is absent.
    pub fn cell(&self, field: &str, row_idx: usize) -> Option<&RawValue> {
        self.column(field).and_then(|c| c.cells.get(row_idx))
    }

    /// Columns that matched no header rule, in source order.
    pub fn unknown_columns(&self) -> &[RawColumn] {
        &self.unknown
    }

    pub fn unknown_headers(&self) -> Vec<String> {
        self.unknown.iter().map(|c| c.header.clone()).collect()
    }

    /// Source headers whose cells were overwritten by a later duplicate.
    pub fn replaced_headers(&self) -> &[String] {
        &self.replaced_headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_row_number() {
        assert_eq!(source_row_number(0), 2);
        assert_eq!(source_row_number(9), 11);
    }

    #[test]
    fn test_raw_table_pads_columns() {
        let table = RawTable::new(vec![
            RawColumn::new("a", vec!["1".into(), "2".into()]),
            RawColumn::new("b", vec!["x".into()]),
        ]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.columns()[1].cells[1], RawValue::Empty);
    }

    #[test]
    fn test_from_rows() {
        let table = RawTable::from_rows(
            vec!["Shape".into(), "Color".into()],
            vec![vec!["Round".into()], vec!["Oval".into(), "D".into(), "extra".into()]],
        );
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.headers().collect::<Vec<_>>(), vec!["Shape", "Color"]);
        assert_eq!(table.columns()[1].cells, vec![RawValue::Empty, "D".into()]);
    }

    #[test]
    fn test_insert_duplicate_keeps_position() {
        let mut table = ReconciledTable::with_row_count(1);
        assert!(table.insert("shape".into(), "Shape".into(), vec!["Round".into()]).is_none());
        assert!(table.insert("color".into(), "Colour".into(), vec!["D".into()]).is_none());
        let replaced = table.insert("shape".into(), "Shp".into(), vec!["Oval".into()]);

        assert_eq!(replaced.as_deref(), Some("Shape"));
        assert_eq!(table.columns()[0].field.as_str(), "shape");
        assert_eq!(table.columns()[0].source_header, "Shp");
        assert_eq!(table.cell("shape", 0), Some(&RawValue::from("Oval")));
        assert_eq!(table.replaced_headers(), ["Shape".to_string()]);
    }

    #[test]
    fn test_field_keys_borrow_as_str() {
        let mut by_field: HashMap<CanonicalField, usize> = HashMap::new();
        by_field.insert("carat".into(), 1);
        assert_eq!(by_field.get("carat"), Some(&1));
        assert_eq!(by_field.get("weight"), None);

        let mut table = ReconciledTable::with_row_count(1);
        table.insert("carat".into(), "Carat".into(), vec!["1.0".into()]);
        assert_eq!(table.column("carat").map(|c| c.source_header.as_str()), Some("Carat"));
        assert!(table.column("Carat").is_none());
    }

    #[test]
    fn test_missing_field() {
        let table = ReconciledTable::with_row_count(3);
        assert!(!table.has_field("shape"));
        assert!(table.cell("shape", 0).is_none());
    }
}
