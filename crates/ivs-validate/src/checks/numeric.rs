//! Numeric sign and bounds checks.
//!
//! Only cells that parse as numbers are judged here; unparsable text is a
//! value-membership concern.

use ivs_model::{CanonicalField, Issue, IssueKind, NumericClass, source_row_number};

use crate::column_reader::ColumnReader;
use crate::config::CheckConfig;

/// Sign check on weight and price fields, then bounds on configured fields.
pub fn check(reader: &ColumnReader<'_>, config: &CheckConfig) -> Vec<Issue> {
    let mut issues = check_sign(reader, config);
    issues.extend(check_bounds(reader, config));
    issues
}

/// Weight wins when a field is listed as both.
fn sign_class(config: &CheckConfig, field: &str) -> Option<NumericClass> {
    if config.weight_fields.iter().any(|f| f == field) {
        Some(NumericClass::Weight)
    } else if config.price_fields.iter().any(|f| f == field) {
        Some(NumericClass::Price)
    } else {
        None
    }
}

fn check_sign(reader: &ColumnReader<'_>, config: &CheckConfig) -> Vec<Issue> {
    let mut issues = Vec::new();
    let mut seen: Vec<&str> = Vec::new();

    for field in config.weight_fields.iter().chain(&config.price_fields) {
        if seen.contains(&field.as_str()) {
            continue;
        }
        seen.push(field);
        let Some(class) = sign_class(config, field) else {
            continue;
        };
        let column = CanonicalField::new(field.as_str());
        issues.extend(
            reader
                .numbers(field)
                .filter(|(_, _, n)| *n <= 0.0)
                .map(|(row_idx, raw, _)| {
                    Issue::new(
                        source_row_number(row_idx),
                        Some(column.clone()),
                        raw.display(),
                        IssueKind::NonPositive { class },
                    )
                }),
        );
    }

    issues
}

fn check_bounds(reader: &ColumnReader<'_>, config: &CheckConfig) -> Vec<Issue> {
    let mut issues = Vec::new();

    for bounds in &config.bounds {
        let sign_checked = sign_class(config, &bounds.field).is_some();
        let column = CanonicalField::new(bounds.field.as_str());
        issues.extend(
            reader
                .numbers(&bounds.field)
                // already reported as non-positive
                .filter(|(_, _, n)| !(sign_checked && *n <= 0.0))
                .filter(|(_, _, n)| !bounds.contains(*n))
                .map(|(row_idx, raw, _)| {
                    Issue::new(
                        source_row_number(row_idx),
                        Some(column.clone()),
                        raw.display(),
                        IssueKind::OutOfBounds {
                            min: bounds.min,
                            max: bounds.max,
                        },
                    )
                }),
        );
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use ivs_model::{RawValue, ReconciledTable};

    fn table(columns: Vec<(&str, Vec<&str>)>) -> ReconciledTable {
        let rows = columns.iter().map(|(_, cells)| cells.len()).max().unwrap_or(0);
        let mut table = ReconciledTable::with_row_count(rows);
        for (field, cells) in columns {
            let cells = cells.iter().map(|c| RawValue::from(*c)).collect();
            table.insert(field.into(), field.to_string(), cells);
        }
        table
    }

    fn run(table: &ReconciledTable) -> Vec<(&'static str, usize, String)> {
        check(&ColumnReader::new(table), &CheckConfig::default())
            .iter()
            .map(|issue| (issue.tag(), issue.row, issue.column_name().to_string()))
            .collect()
    }

    #[test]
    fn test_bounds_are_closed() {
        let table = table(vec![("carat", vec!["0.05", "20", "20.01", "0.04", "1.5"])]);
        assert_eq!(
            run(&table),
            vec![
                ("out_of_bounds", 4, "carat".to_string()),
                ("out_of_bounds", 5, "carat".to_string()),
            ]
        );
    }

    #[test]
    fn test_out_of_bounds_carries_interval() {
        let table = table(vec![("carat", vec!["25"])]);
        let issues = check(&ColumnReader::new(&table), &CheckConfig::default());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].value.as_deref(), Some("25"));
        assert!(matches!(
            issues[0].kind,
            IssueKind::OutOfBounds { min, max } if min == 0.05 && max == 20.0
        ));
    }

    #[test]
    fn test_non_positive_weight_not_also_out_of_bounds() {
        let table = table(vec![("carat", vec!["0", "-1"])]);
        assert_eq!(
            run(&table),
            vec![
                ("non_positive", 2, "carat".to_string()),
                ("non_positive", 3, "carat".to_string()),
            ]
        );
    }

    #[test]
    fn test_negative_prices() {
        let table = table(vec![
            ("price_per_carat", vec!["-5", "100"]),
            ("total_sales_price", vec!["100", "0"]),
        ]);
        let issues = check(&ColumnReader::new(&table), &CheckConfig::default());
        let found: Vec<_> = issues
            .iter()
            .map(|i| (i.row, i.column_name(), i.kind.clone()))
            .collect();
        assert_eq!(
            found,
            vec![
                (
                    2,
                    "price_per_carat",
                    IssueKind::NonPositive {
                        class: NumericClass::Price
                    }
                ),
                (
                    3,
                    "total_sales_price",
                    IssueKind::NonPositive {
                        class: NumericClass::Price
                    }
                ),
            ]
        );
    }

    #[test]
    fn test_unparsable_cells_are_skipped() {
        let table = table(vec![
            ("carat", vec!["abc", "", "nan"]),
            ("price_per_carat", vec!["N/A", "-", "call"]),
            ("depth", vec!["deep", "", ""]),
        ]);
        assert!(run(&table).is_empty());
    }

    #[test]
    fn test_unsigned_field_only_bounded() {
        let table = table(vec![("depth", vec!["-1", "62.5", "95"])]);
        assert_eq!(
            run(&table),
            vec![
                ("out_of_bounds", 2, "depth".to_string()),
                ("out_of_bounds", 4, "depth".to_string()),
            ]
        );
    }
}
