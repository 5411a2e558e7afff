//! Polars `AnyValue` conversion into raw supplier cells.

use ivs_model::{RawValue, format_numeric};
use polars::prelude::*;

/// Converts a Polars `AnyValue` to a [`RawValue`].
///
/// Strings stay text exactly as read (no trimming), numeric types become
/// [`RawValue::Number`], and nulls become [`RawValue::Empty`].
///
/// # Examples
///
/// ```
/// use ivs_common::any_to_raw;
/// use ivs_model::RawValue;
/// use polars::prelude::AnyValue;
///
/// assert_eq!(any_to_raw(AnyValue::Null), RawValue::Empty);
/// assert_eq!(any_to_raw(AnyValue::String("0.50")), RawValue::from("0.50"));
/// assert_eq!(any_to_raw(AnyValue::Int32(3)), RawValue::Number(3.0));
/// ```
pub fn any_to_raw(value: AnyValue<'_>) -> RawValue {
    match value {
        AnyValue::Null => RawValue::Empty,
        AnyValue::String(s) => RawValue::Text(s.to_string()),
        AnyValue::StringOwned(s) => RawValue::Text(s.to_string()),
        AnyValue::Int8(v) => RawValue::Number(f64::from(v)),
        AnyValue::Int16(v) => RawValue::Number(f64::from(v)),
        AnyValue::Int32(v) => RawValue::Number(f64::from(v)),
        AnyValue::Int64(v) => RawValue::Number(v as f64),
        AnyValue::UInt8(v) => RawValue::Number(f64::from(v)),
        AnyValue::UInt16(v) => RawValue::Number(f64::from(v)),
        AnyValue::UInt32(v) => RawValue::Number(f64::from(v)),
        AnyValue::UInt64(v) => RawValue::Number(v as f64),
        AnyValue::Float32(v) => RawValue::Number(f64::from(v)),
        AnyValue::Float64(v) => RawValue::Number(v),
        AnyValue::Boolean(b) => RawValue::Text(if b { "TRUE" } else { "FALSE" }.to_string()),
        // For any other type, use Display but strip outer quotes if present
        other => {
            let s = other.to_string();
            if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
                RawValue::Text(s[1..s.len() - 1].to_string())
            } else {
                RawValue::Text(s)
            }
        }
    }
}

/// Converts an `AnyValue` to its display string; empty for null.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match any_to_raw(value) {
        RawValue::Number(n) => format_numeric(n),
        other => other.to_string(),
    }
}

/// Read every cell of a column as raw values, in row order.
pub fn column_to_raw(column: &Column) -> Vec<RawValue> {
    (0..column.len())
        .map(|idx| column.get(idx).map_or(RawValue::Empty, any_to_raw))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_to_raw_null() {
        assert_eq!(any_to_raw(AnyValue::Null), RawValue::Empty);
    }

    #[test]
    fn test_any_to_raw_keeps_text_verbatim() {
        assert_eq!(any_to_raw(AnyValue::String(" Round ")), RawValue::from(" Round "));
        assert_eq!(any_to_raw(AnyValue::String("")), RawValue::from(""));
    }

    #[test]
    fn test_any_to_raw_numbers() {
        assert_eq!(any_to_raw(AnyValue::Int64(-100)), RawValue::Number(-100.0));
        assert_eq!(any_to_raw(AnyValue::UInt32(0)), RawValue::Number(0.0));
        assert_eq!(any_to_raw(AnyValue::Float64(1.5)), RawValue::Number(1.5));
    }

    #[test]
    fn test_any_to_raw_boolean() {
        assert_eq!(any_to_raw(AnyValue::Boolean(true)), RawValue::from("TRUE"));
    }

    #[test]
    fn test_any_to_string() {
        assert_eq!(any_to_string(AnyValue::Null), "");
        assert_eq!(any_to_string(AnyValue::Float64(1.0)), "1");
        assert_eq!(any_to_string(AnyValue::String("VS1")), "VS1");
    }

    #[test]
    fn test_column_to_raw() {
        let column = Column::new("shape".into(), &[Some("Round"), None, Some("Oval")]);
        assert_eq!(
            column_to_raw(&column),
            vec![RawValue::from("Round"), RawValue::Empty, RawValue::from("Oval")]
        );
    }
}
