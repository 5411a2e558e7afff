//! Sectioned issue report.
//!
//! Issues are grouped into numbered sections by the field they concern. Each
//! non-empty section becomes one worksheet of the report workbook.

use std::collections::BTreeMap;
use std::fmt;

use ivs_model::{Issue, IssueKind, fields};
use ivs_validate::ValidationReport;

/// Column headers of every section sheet.
pub const REPORT_HEADERS: [&str; 6] = ["Stock No.", "Issue Type", "Column", "Value", "Details", "Row"];

/// Sheet written when a run found nothing.
pub const NO_ISSUES_SHEET: &str = "No Issues Found";

/// Report section, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    StockNumber,
    Shape,
    Weight,
    Color,
    Clarity,
    ImageUrl,
    VideoUrl,
    CertificateUrl,
    Price,
    Other,
}

impl Section {
    pub const fn all() -> &'static [Self] {
        &[
            Self::StockNumber,
            Self::Shape,
            Self::Weight,
            Self::Color,
            Self::Clarity,
            Self::ImageUrl,
            Self::VideoUrl,
            Self::CertificateUrl,
            Self::Price,
            Self::Other,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::StockNumber => "1. Stock Number",
            Self::Shape => "2. Shape",
            Self::Weight => "3. Weight",
            Self::Color => "4. Color",
            Self::Clarity => "5. Clarity",
            Self::ImageUrl => "6. Image URL",
            Self::VideoUrl => "7. Video URL",
            Self::CertificateUrl => "8. Certificate URL",
            Self::Price => "9. Price",
            Self::Other => "10. Other Issues / Cut Grade",
        }
    }

    /// Section an issue is reported under.
    ///
    /// Price mismatches always go to Price and cut grade issues to Other,
    /// whatever column they carry.
    pub fn for_issue(issue: &Issue) -> Self {
        if matches!(issue.kind, IssueKind::PriceMismatch { .. }) {
            return Self::Price;
        }
        match issue.column_name() {
            fields::STOCK_NUM => Self::StockNumber,
            fields::SHAPE => Self::Shape,
            fields::CARAT | fields::WEIGHT | fields::CARAT_WEIGHT => Self::Weight,
            fields::COLOR => Self::Color,
            fields::CLARITY => Self::Clarity,
            fields::IMAGE_URL_1 => Self::ImageUrl,
            fields::VIDEO_URL_1 => Self::VideoUrl,
            fields::CERT_URL_1 => Self::CertificateUrl,
            fields::PRICE_PER_CARAT | fields::TOTAL_SALES_PRICE => Self::Price,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// One report line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub stock_no: String,
    pub issue_type: &'static str,
    pub column: String,
    pub value: String,
    pub details: String,
    pub row: usize,
}

impl ReportRow {
    pub fn from_issue(report: &ValidationReport, issue: &Issue) -> Self {
        Self {
            stock_no: report.row_label(issue.row),
            issue_type: issue.kind.label(),
            column: issue.column_name().to_string(),
            value: issue.value.clone().unwrap_or_default(),
            details: issue.detail(),
            row: issue.row,
        }
    }
}

/// Report rows per section, keeping issue order within a section.
pub fn group_by_section(report: &ValidationReport) -> BTreeMap<Section, Vec<ReportRow>> {
    let mut sections: BTreeMap<Section, Vec<ReportRow>> = BTreeMap::new();
    for issue in &report.issues {
        sections
            .entry(Section::for_issue(issue))
            .or_default()
            .push(ReportRow::from_issue(report, issue));
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use ivs_model::NumericClass;

    fn issue(column: &str, kind: IssueKind) -> Issue {
        Issue::new(2, Some(column.into()), None, kind)
    }

    #[test]
    fn test_section_mapping() {
        let cases = [
            ("stock_num", Section::StockNumber),
            ("carat_weight", Section::Weight),
            ("cert_url_1", Section::CertificateUrl),
            ("price_per_carat", Section::Price),
            ("cut_grade", Section::Other),
            ("cut", Section::Other),
            ("fluorescence", Section::Other),
        ];
        for (column, expected) in cases {
            let kind = IssueKind::NonPositive {
                class: NumericClass::Price,
            };
            assert_eq!(Section::for_issue(&issue(column, kind)), expected, "{column}");
        }
    }

    #[test]
    fn test_price_mismatch_always_price() {
        let kind = IssueKind::PriceMismatch {
            expected: 1.0,
            weight: 1.0,
            unit_price: 1.0,
            total: 2.0,
        };
        assert_eq!(Section::for_issue(&issue("carat", kind)), Section::Price);
    }

    #[test]
    fn test_sections_ordered() {
        let titles: Vec<_> = Section::all().iter().map(Section::title).collect();
        assert_eq!(titles.first(), Some(&"1. Stock Number"));
        assert_eq!(titles.last(), Some(&"10. Other Issues / Cut Grade"));
        assert!(Section::all().windows(2).all(|w| w[0] < w[1]));
    }
}
