//! Issue aggregation.

use ivs_model::Issue;

use crate::checks::StageIssues;

/// Concatenate stage outputs in stage order.
///
/// Within a stage issues are ordered by source row; ties keep the order the
/// stage produced them in. No deduplication.
pub fn aggregate(stages: StageIssues) -> Vec<Issue> {
    let total = stages.values().map(Vec::len).sum();
    let mut issues = Vec::with_capacity(total);
    for (_, mut stage_issues) in stages {
        stage_issues.sort_by_key(|issue| issue.row);
        issues.extend(stage_issues);
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use ivs_model::{IssueKind, NumericClass, Stage};

    fn issue(row: usize, column: &str, kind: IssueKind) -> Issue {
        Issue::new(row, Some(column.into()), None, kind)
    }

    #[test]
    fn test_stage_order_then_row_order() {
        let mut stages = StageIssues::new();
        stages.insert(
            Stage::CrossField,
            vec![issue(
                2,
                "total_sales_price",
                IssueKind::PriceMismatch {
                    expected: 1.0,
                    weight: 1.0,
                    unit_price: 1.0,
                    total: 2.0,
                },
            )],
        );
        stages.insert(
            Stage::Mandatory,
            vec![
                issue(
                    4,
                    "shape",
                    IssueKind::MissingMandatory {
                        column_present: true,
                    },
                ),
                issue(
                    3,
                    "shape",
                    IssueKind::MissingMandatory {
                        column_present: true,
                    },
                ),
                issue(
                    3,
                    "color",
                    IssueKind::MissingMandatory {
                        column_present: true,
                    },
                ),
            ],
        );
        stages.insert(
            Stage::Numeric,
            vec![issue(
                2,
                "carat",
                IssueKind::NonPositive {
                    class: NumericClass::Weight,
                },
            )],
        );

        let issues = aggregate(stages);
        let order: Vec<_> = issues
            .iter()
            .map(|i| (i.stage(), i.row, i.column_name().to_string()))
            .collect();
        assert_eq!(
            order,
            vec![
                (Stage::Mandatory, 3, "shape".to_string()),
                (Stage::Mandatory, 3, "color".to_string()),
                (Stage::Mandatory, 4, "shape".to_string()),
                (Stage::Numeric, 2, "carat".to_string()),
                (Stage::CrossField, 2, "total_sales_price".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty() {
        assert!(aggregate(StageIssues::new()).is_empty());
    }
}
