//! Mandatory field presence.

use ivs_model::{CanonicalField, Issue, IssueKind, source_row_number};

use crate::column_reader::ColumnReader;

/// Flag every (row, field) pair whose column is absent or whose cell is empty.
pub fn check(reader: &ColumnReader<'_>, mandatory_fields: &[String]) -> Vec<Issue> {
    let mut issues = Vec::new();

    for field in mandatory_fields {
        let column = CanonicalField::new(field.as_str());

        if !reader.has_column(field) {
            // Absent column: every row is missing the value
            issues.extend((0..reader.height()).map(|row_idx| {
                Issue::new(
                    source_row_number(row_idx),
                    Some(column.clone()),
                    None,
                    IssueKind::MissingMandatory {
                        column_present: false,
                    },
                )
            }));
            continue;
        }

        issues.extend(reader.empty_cells(field).map(|(row_idx, raw)| {
            Issue::new(
                source_row_number(row_idx),
                Some(column.clone()),
                raw.display(),
                IssueKind::MissingMandatory {
                    column_present: true,
                },
            )
        }));
    }

    issues
}
