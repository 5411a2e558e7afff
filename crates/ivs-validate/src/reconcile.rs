//! Schema reconciliation.
//!
//! Maps supplier headers onto canonical fields. Purely structural: values
//! are never inspected.

use ivs_model::{RawTable, ReconciledTable};
use ivs_rules::HeaderRules;

/// Rename mappable columns to their canonical field.
///
/// Unmapped columns are kept as unknown columns. When two source columns
/// map to the same field, the field keeps the first column's position and
/// the later column's cells.
pub fn reconcile(raw: RawTable, headers: &HeaderRules) -> ReconciledTable {
    let mut table = ReconciledTable::with_row_count(raw.row_count());

    for column in raw.into_columns() {
        match headers.lookup(&column.header).cloned() {
            Some(field) => {
                tracing::debug!(header = %column.header, field = %field, "Mapped column");
                if let Some(replaced) = table.insert(field.clone(), column.header, column.cells) {
                    tracing::warn!(
                        field = %field,
                        replaced = %replaced,
                        "Duplicate column for field, later column replaces earlier one"
                    );
                }
            }
            None => {
                tracing::debug!(header = %column.header, "Unknown column");
                table.push_unknown(column);
            }
        }
    }

    tracing::info!(
        mapped = table.columns().len(),
        unknown = table.unknown_columns().len(),
        replaced = table.replaced_headers().len(),
        "Reconciled supplier headers"
    );
    table
}
