//! Value membership against the value rules.

use ivs_model::{Issue, IssueKind, source_row_number};
use ivs_rules::ValueRules;

use crate::column_reader::ColumnReader;

/// Flag non-empty cells whose normalized value is not accepted.
///
/// Columns without a value rule, and wildcard columns, are not checked.
pub fn check(reader: &ColumnReader<'_>, values: &ValueRules) -> Vec<Issue> {
    let mut issues = Vec::new();

    for column in reader.columns() {
        let Some(rule) = values.get(&column.field) else {
            continue;
        };
        if rule.is_wildcard() {
            continue;
        }

        let before = issues.len();
        issues.extend(
            reader
                .normalized(column.field.as_str())
                .filter(|(_, _, key)| !rule.accepts(key))
                .map(|(row_idx, raw, _)| {
                    Issue::new(
                        source_row_number(row_idx),
                        Some(column.field.clone()),
                        raw.display(),
                        IssueKind::InvalidValue,
                    )
                }),
        );
        tracing::debug!(
            field = %column.field,
            accepted = rule.accepted_count(),
            invalid = issues.len() - before,
            "Checked value membership"
        );
    }

    issues
}
