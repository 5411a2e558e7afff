//! Column reader utilities for field checks.
//!
//! [`ColumnReader`] wraps a [`ReconciledTable`] and yields cells together with
//! their 0-based row index, applying the shared normalizer so checks never
//! re-implement emptiness or number parsing.
//!
//! # Example
//!
//! ```ignore
//! let reader = ColumnReader::new(&table);
//!
//! for (row_idx, raw) in reader.empty_cells("shape") {
//!     // ...
//! }
//!
//! let weight = reader.first_present(&config.weight_fields);
//! ```

use ivs_common::{is_empty, normalize_raw, to_number};
use ivs_model::{RawValue, ReconciledColumn, ReconciledTable};

/// Read access to reconciled columns for validation.
#[derive(Debug, Clone, Copy)]
pub struct ColumnReader<'a> {
    table: &'a ReconciledTable,
}

impl<'a> ColumnReader<'a> {
    #[inline]
    pub fn new(table: &'a ReconciledTable) -> Self {
        Self { table }
    }

    /// Number of data rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.table.row_count()
    }

    #[inline]
    pub fn column(&self, field: &str) -> Option<&'a ReconciledColumn> {
        self.table.column(field)
    }

    #[inline]
    pub fn has_column(&self, field: &str) -> bool {
        self.table.has_field(field)
    }

    /// Reconciled columns in first-seen order.
    pub fn columns(&self) -> &'a [ReconciledColumn] {
        self.table.columns()
    }

    /// First of `fields` present in the table.
    pub fn first_present<S: AsRef<str>>(&self, fields: &[S]) -> Option<&'a ReconciledColumn> {
        fields.iter().find_map(|f| self.column(f.as_ref()))
    }

    /// Every cell with its row index; empty iterator when the field is absent.
    pub fn cells(&self, field: &str) -> impl Iterator<Item = (usize, &'a RawValue)> + use<'a> {
        self.column(field)
            .into_iter()
            .flat_map(|c| c.cells.iter().enumerate())
    }

    /// Empty cells of a field.
    pub fn empty_cells(&self, field: &str) -> impl Iterator<Item = (usize, &'a RawValue)> + use<'a> {
        self.cells(field).filter(|(_, raw)| is_empty(raw))
    }

    /// Non-empty cells with their normalized value key.
    pub fn normalized(
        &self,
        field: &str,
    ) -> impl Iterator<Item = (usize, &'a RawValue, String)> + use<'a> {
        self.cells(field)
            .filter_map(|(idx, raw)| normalize_raw(raw).map(|key| (idx, raw, key)))
    }

    /// Cells that parse as numbers.
    pub fn numbers(&self, field: &str) -> impl Iterator<Item = (usize, &'a RawValue, f64)> + use<'a> {
        self.cells(field)
            .filter_map(|(idx, raw)| to_number(raw).map(|n| (idx, raw, n)))
    }

    /// Number in a column at a row, `None` if absent, empty or unparsable.
    pub fn number_at(column: &ReconciledColumn, row_idx: usize) -> Option<f64> {
        column.cells.get(row_idx).and_then(to_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ReconciledTable {
        let mut table = ReconciledTable::with_row_count(3);
        table.insert(
            "carat".into(),
            "Carat".into(),
            vec!["0.50".into(), "".into(), "abc".into()],
        );
        table.insert(
            "shape".into(),
            "Shape".into(),
            vec![" Round ".into(), "nan".into(), RawValue::Empty],
        );
        table
    }

    #[test]
    fn test_cells_absent_field() {
        let table = table();
        let reader = ColumnReader::new(&table);
        assert_eq!(reader.cells("color").count(), 0);
        assert_eq!(reader.height(), 3);
    }

    #[test]
    fn test_empty_cells() {
        let table = table();
        let reader = ColumnReader::new(&table);
        let rows: Vec<_> = reader.empty_cells("shape").map(|(i, _)| i).collect();
        assert_eq!(rows, vec![1, 2]);
    }

    #[test]
    fn test_normalized() {
        let table = table();
        let reader = ColumnReader::new(&table);
        let keys: Vec<_> = reader.normalized("shape").map(|(_, _, k)| k).collect();
        assert_eq!(keys, vec!["round"]);
    }

    #[test]
    fn test_numbers_skip_unparsable() {
        let table = table();
        let reader = ColumnReader::new(&table);
        let numbers: Vec<_> = reader.numbers("carat").map(|(i, _, n)| (i, n)).collect();
        assert_eq!(numbers, vec![(0, 0.5)]);
    }

    #[test]
    fn test_first_present() {
        let table = table();
        let reader = ColumnReader::new(&table);
        let found = reader.first_present(&["weight", "carat"]).unwrap();
        assert_eq!(found.field.as_str(), "carat");
        assert!(reader.first_present(&["cut_grade", "cut"]).is_none());
    }
}
