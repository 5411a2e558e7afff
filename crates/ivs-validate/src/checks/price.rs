//! Price consistency: total = round(weight * unit price, 2).

use ivs_model::{Issue, IssueKind, RawValue, source_row_number};

use crate::column_reader::ColumnReader;
use crate::config::CheckConfig;

/// Allowed absolute difference between expected and stated total.
pub const PRICE_TOLERANCE: f64 = 0.01;

/// Round half away from zero to 2 decimal places.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Flag rows whose total price disagrees with weight times unit price.
///
/// Rows where any operand is absent, empty or unparsable are skipped.
pub fn check(reader: &ColumnReader<'_>, config: &CheckConfig) -> Vec<Issue> {
    let (Some(weight), Some(unit), Some(total)) = (
        reader.first_present(&config.weight_fields),
        reader.column(&config.price.unit_price),
        reader.column(&config.price.total_price),
    ) else {
        tracing::debug!("Price consistency skipped, operand column missing");
        return Vec::new();
    };

    let mut issues = Vec::new();
    for row_idx in 0..reader.height() {
        let (Some(w), Some(ppc), Some(tsp)) = (
            ColumnReader::number_at(weight, row_idx),
            ColumnReader::number_at(unit, row_idx),
            ColumnReader::number_at(total, row_idx),
        ) else {
            continue;
        };

        let expected = round_cents(w * ppc);
        if (expected - tsp).abs() > PRICE_TOLERANCE {
            issues.push(Issue::new(
                source_row_number(row_idx),
                Some(total.field.clone()),
                total.cells.get(row_idx).and_then(RawValue::display),
                IssueKind::PriceMismatch {
                    expected,
                    weight: w,
                    unit_price: ppc,
                    total: tsp,
                },
            ));
        }
    }

    issues
}
