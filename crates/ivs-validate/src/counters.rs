//! Per-field counters derived from the issue list.

use std::collections::{BTreeMap, BTreeSet};

use ivs_model::{Issue, IssueKind, UrlStatus, fields};
use serde::{Deserialize, Serialize};

/// Counts renderers build summaries from. Derived purely by grouping issues.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueCounters {
    /// Mandatory values missing, per field.
    pub missing_by_field: BTreeMap<String, usize>,
    /// Values rejected by membership, sign or bounds checks, per field.
    pub invalid_by_field: BTreeMap<String, usize>,
    /// URL classifications other than `WORKING`, per field.
    pub url_by_field: BTreeMap<String, BTreeMap<UrlStatus, usize>>,
    /// Certificate links with a bad extension, per field.
    pub format_by_field: BTreeMap<String, usize>,
    pub price_mismatch: usize,
    pub missing_cut_grade: usize,
    /// Distinct rejected shape values, as written.
    pub invalid_shapes: BTreeSet<String>,
    /// Distinct rejected colour values, as written.
    pub invalid_colors: BTreeSet<String>,
}

impl IssueCounters {
    pub fn from_issues<'a>(issues: impl IntoIterator<Item = &'a Issue>) -> Self {
        let mut counters = Self::default();
        for issue in issues {
            let field = issue.column_name().to_string();
            match &issue.kind {
                IssueKind::MissingMandatory { .. } => {
                    *counters.missing_by_field.entry(field).or_default() += 1;
                }
                IssueKind::MissingCutGrade => counters.missing_cut_grade += 1,
                IssueKind::InvalidValue => {
                    if let Some(value) = &issue.value {
                        if field == fields::SHAPE {
                            counters.invalid_shapes.insert(value.clone());
                        } else if field == fields::COLOR {
                            counters.invalid_colors.insert(value.clone());
                        }
                    }
                    *counters.invalid_by_field.entry(field).or_default() += 1;
                }
                IssueKind::NonPositive { .. } | IssueKind::OutOfBounds { .. } => {
                    *counters.invalid_by_field.entry(field).or_default() += 1;
                }
                IssueKind::UrlNotProvided => counters.add_url(field, UrlStatus::NotProvided),
                IssueKind::UrlNotWorking { .. } => counters.add_url(field, UrlStatus::NotWorking),
                IssueKind::CertificateFormat { .. } => {
                    *counters.format_by_field.entry(field).or_default() += 1;
                }
                IssueKind::PriceMismatch { .. } => counters.price_mismatch += 1,
            }
        }
        counters
    }

    fn add_url(&mut self, field: String, status: UrlStatus) {
        *self
            .url_by_field
            .entry(field)
            .or_default()
            .entry(status)
            .or_default() += 1;
    }

    pub fn missing(&self, field: &str) -> usize {
        self.missing_by_field.get(field).copied().unwrap_or(0)
    }

    pub fn invalid(&self, field: &str) -> usize {
        self.invalid_by_field.get(field).copied().unwrap_or(0)
    }

    pub fn url(&self, field: &str, status: UrlStatus) -> usize {
        self.url_by_field
            .get(field)
            .and_then(|by_status| by_status.get(&status))
            .copied()
            .unwrap_or(0)
    }

    pub fn bad_format(&self, field: &str) -> usize {
        self.format_by_field.get(field).copied().unwrap_or(0)
    }

    /// Missing plus invalid for a field.
    pub fn problems(&self, field: &str) -> usize {
        self.missing(field) + self.invalid(field)
    }
}
