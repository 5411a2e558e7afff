//! Raw cell values as they arrive from a supplier table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell of a supplier table, before any normalization.
///
/// Supplier files mix text and numbers freely, so the type of a cell is only
/// known after loading: CSV cells are always [`RawValue::Text`], workbook cells
/// keep their numeric type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum RawValue {
    /// Blank cell (null in the source).
    #[default]
    Empty,
    /// Text exactly as written in the source.
    Text(String),
    /// Numeric cell.
    Number(f64),
}

impl RawValue {
    /// Build a text value; `None` maps to [`RawValue::Empty`].
    pub fn text(value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => Self::Text(v.into()),
            None => Self::Empty,
        }
    }

    /// True for [`RawValue::Empty`] only.
    ///
    /// This is a structural check. Whether a value counts as "missing" for
    /// validation is decided by the normalizer, not here.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Display form used in issue records and reports.
    ///
    /// Returns `None` for empty cells.
    pub fn display(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => f.write_str(&format_numeric(*n)),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Formats a floating-point number as a string without trailing zeros after decimal.
///
/// Only trims trailing zeros if the number contains a decimal point.
/// Integer-valued floats like 40.0 are formatted as "40", not "4".
///
/// # Examples
///
/// ```
/// use ivs_model::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.50), "1.5");
/// assert_eq!(format_numeric(40.0), "40");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(RawValue::Empty.to_string(), "");
        assert_eq!(RawValue::from("Round").to_string(), "Round");
        assert_eq!(RawValue::Number(1.0).to_string(), "1");
        assert_eq!(RawValue::Number(0.5).to_string(), "0.5");
        assert_eq!(RawValue::Number(-3.25).to_string(), "-3.25");
    }

    #[test]
    fn test_display_option() {
        assert_eq!(RawValue::Empty.display(), None);
        assert_eq!(RawValue::from(" ").display(), Some(" ".to_string()));
        assert_eq!(RawValue::Number(100.0).display(), Some("100".to_string()));
    }

    #[test]
    fn test_text_constructor() {
        assert_eq!(RawValue::text(None::<String>), RawValue::Empty);
        assert_eq!(RawValue::text(Some("VS1")), RawValue::from("VS1"));
    }

    #[test]
    fn test_format_numeric() {
        assert_eq!(format_numeric(0.0), "0");
        assert_eq!(format_numeric(100.0), "100");
        assert_eq!(format_numeric(1000.0), "1000");
        assert_eq!(format_numeric(10.5), "10.5");
        assert_eq!(format_numeric(40.50), "40.5");
    }
}
