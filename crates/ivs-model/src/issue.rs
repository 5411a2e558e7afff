//! Validation issue types.
//!
//! Every checker emits [`Issue`] records directly. Each [`IssueKind`] variant
//! carries only the data it needs, and the category, tag, stage and detail
//! text are all derived from it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::table::CanonicalField;
use crate::value::format_numeric;

/// Issue category used for grouping and counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Missing,
    Invalid,
    Range,
    Url,
    PriceMismatch,
}

impl Category {
    /// Get all categories.
    pub const fn all() -> &'static [Self] {
        &[
            Self::Missing,
            Self::Invalid,
            Self::Range,
            Self::Url,
            Self::PriceMismatch,
        ]
    }

    /// Parse a category name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "missing" => Some(Self::Missing),
            "invalid" => Some(Self::Invalid),
            "range" => Some(Self::Range),
            "url" => Some(Self::Url),
            "price mismatch" | "price_mismatch" | "price-mismatch" => Some(Self::PriceMismatch),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Missing => "Missing",
            Self::Invalid => "Invalid",
            Self::Range => "Range",
            Self::Url => "URL",
            Self::PriceMismatch => "Price Mismatch",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Missing => "Mandatory or expected values that are absent",
            Self::Invalid => "Values outside the accepted list for a field",
            Self::Range => "Numeric values with a bad sign or outside bounds",
            Self::Url => "Media and certificate link problems",
            Self::PriceMismatch => "Total price inconsistent with weight and unit price",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Checking stage, in aggregation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    Mandatory,
    Numeric,
    Value,
    Url,
    CutGrade,
    CrossField,
    Format,
}

impl Stage {
    /// All stages in the order their issues are aggregated.
    pub const fn all() -> &'static [Self] {
        &[
            Self::Mandatory,
            Self::Numeric,
            Self::Value,
            Self::Url,
            Self::CutGrade,
            Self::CrossField,
            Self::Format,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Mandatory => "Mandatory",
            Self::Numeric => "Numeric",
            Self::Value => "Value",
            Self::Url => "URL",
            Self::CutGrade => "Cut Grade",
            Self::CrossField => "Cross-field",
            Self::Format => "Format",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which sign rule a numeric field falls under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericClass {
    Weight,
    Price,
}

impl NumericClass {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Weight => "Weight",
            Self::Price => "Price",
        }
    }
}

/// What went wrong - each variant carries only its needed data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IssueKind {
    // Presence
    /// Mandatory field is empty, or its column is absent from the table
    MissingMandatory { column_present: bool },
    /// Cut grade column exists but the cell is empty
    MissingCutGrade,

    // Membership
    /// Value not in the field's accepted set
    InvalidValue,

    // Numeric
    /// Weight or price parsed to zero or less
    NonPositive { class: NumericClass },
    /// Value parsed but lies outside the configured closed interval
    OutOfBounds { min: f64, max: f64 },

    // Links
    /// URL-bearing cell is empty
    UrlNotProvided,
    /// Probe returned a non-success status or failed outright
    UrlNotWorking {
        http_status: Option<u16>,
        reason: Option<String>,
    },
    /// Certificate link lacks a required file extension
    CertificateFormat { expected: Vec<String> },

    // Cross-field
    /// Total price differs from round(weight * unit price, 2) by more than 0.01
    PriceMismatch {
        expected: f64,
        weight: f64,
        unit_price: f64,
        total: f64,
    },
}

impl IssueKind {
    pub fn category(&self) -> Category {
        match self {
            Self::MissingMandatory { .. } | Self::MissingCutGrade => Category::Missing,
            Self::InvalidValue => Category::Invalid,
            Self::NonPositive { .. } | Self::OutOfBounds { .. } => Category::Range,
            Self::UrlNotProvided | Self::UrlNotWorking { .. } | Self::CertificateFormat { .. } => {
                Category::Url
            }
            Self::PriceMismatch { .. } => Category::PriceMismatch,
        }
    }

    /// Stable tag for downstream grouping.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::MissingMandatory { .. } => "missing_mandatory",
            Self::MissingCutGrade => "missing_cut_grade",
            Self::InvalidValue => "invalid_value",
            Self::NonPositive { .. } => "non_positive",
            Self::OutOfBounds { .. } => "out_of_bounds",
            Self::UrlNotProvided => "url_not_provided",
            Self::UrlNotWorking { .. } => "url_not_working",
            Self::CertificateFormat { .. } => "certificate_format",
            Self::PriceMismatch { .. } => "price_mismatch",
        }
    }

    /// Stage that emits this kind of issue.
    pub fn stage(&self) -> Stage {
        match self {
            Self::MissingMandatory { .. } => Stage::Mandatory,
            Self::NonPositive { .. } | Self::OutOfBounds { .. } => Stage::Numeric,
            Self::InvalidValue => Stage::Value,
            Self::UrlNotProvided | Self::UrlNotWorking { .. } => Stage::Url,
            Self::MissingCutGrade => Stage::CutGrade,
            Self::PriceMismatch { .. } => Stage::CrossField,
            Self::CertificateFormat { .. } => Stage::Format,
        }
    }

    /// Short label for the issue type column of reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MissingMandatory { .. } | Self::MissingCutGrade => "Missing",
            Self::InvalidValue => "Invalid",
            Self::NonPositive { .. } => "Not Positive",
            Self::OutOfBounds { .. } => "Out of Range",
            Self::UrlNotProvided => "NOT_PROVIDED",
            Self::UrlNotWorking { .. } => "NOT_WORKING",
            Self::CertificateFormat { .. } => "Bad Format",
            Self::PriceMismatch { .. } => "Price Mismatch",
        }
    }

    /// Human-readable detail text.
    pub fn detail(&self) -> String {
        match self {
            Self::MissingMandatory {
                column_present: true,
            } => "Mandatory value is empty".to_string(),
            Self::MissingMandatory {
                column_present: false,
            } => "Mandatory column is missing from the file".to_string(),
            Self::MissingCutGrade => "Cut grade is missing".to_string(),
            Self::InvalidValue => "Value is not in the accepted list".to_string(),
            Self::NonPositive { class } => {
                format!("{} must be greater than zero", class.label())
            }
            Self::OutOfBounds { min, max } => format!(
                "Value outside allowed range [{}, {}]",
                format_numeric(*min),
                format_numeric(*max)
            ),
            Self::UrlNotProvided => "URL not provided".to_string(),
            Self::UrlNotWorking {
                http_status,
                reason,
            } => match (http_status, reason) {
                (Some(status), _) => format!("URL not working (HTTP {status})"),
                (None, Some(reason)) => format!("URL not working ({reason})"),
                (None, None) => "URL not working".to_string(),
            },
            Self::CertificateFormat { expected } => {
                format!("Certificate link must end with {}", expected.join(" or "))
            }
            Self::PriceMismatch {
                expected,
                weight,
                unit_price,
                total,
            } => format!(
                "Expected {expected:.2} = {} x {}, got {total:.2}",
                format_numeric(*weight),
                format_numeric(*unit_price)
            ),
        }
    }
}

/// One structured defect tied to a source row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Source row number (data index + 2).
    pub row: usize,
    /// Canonical column, `None` for row-level issues.
    pub column: Option<CanonicalField>,
    /// Offending raw value, as displayed.
    pub value: Option<String>,
    pub kind: IssueKind,
}

impl Issue {
    pub fn new(
        row: usize,
        column: Option<CanonicalField>,
        value: Option<String>,
        kind: IssueKind,
    ) -> Self {
        Self {
            row,
            column,
            value,
            kind,
        }
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    pub fn tag(&self) -> &'static str {
        self.kind.tag()
    }

    pub fn stage(&self) -> Stage {
        self.kind.stage()
    }

    pub fn detail(&self) -> String {
        self.kind.detail()
    }

    /// Column name, or empty for row-level issues.
    pub fn column_name(&self) -> &str {
        self.column.as_ref().map_or("", CanonicalField::as_str)
    }
}
