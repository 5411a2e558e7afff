//! Missing cut grade.

use ivs_model::{Issue, IssueKind, source_row_number};

use crate::column_reader::ColumnReader;

/// Flag empty cells in the first cut grade column present.
///
/// A table without any cut grade column produces no issues.
pub fn check(reader: &ColumnReader<'_>, cut_grade_fields: &[String]) -> Vec<Issue> {
    let Some(column) = reader.first_present(cut_grade_fields) else {
        return Vec::new();
    };

    reader
        .empty_cells(column.field.as_str())
        .map(|(row_idx, raw)| {
            Issue::new(
                source_row_number(row_idx),
                Some(column.field.clone()),
                raw.display(),
                IssueKind::MissingCutGrade,
            )
        })
        .collect()
}
