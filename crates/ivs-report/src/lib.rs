//! Renderers for validation reports.
//!
//! - [`write_report_workbook`]: one worksheet per numbered report section
//! - [`build_email_body`]: supplier-facing summary text
//! - [`write_json`]: flat issue records as JSON

mod common;
mod email;
mod json;
mod section;
mod workbook;

pub use common::{MAX_SHEET_NAME_LEN, sanitize_sheet_name};
pub use email::build_email_body;
pub use json::{IssueRecord, issue_records, issues_to_json, write_json};
pub use section::{NO_ISSUES_SHEET, REPORT_HEADERS, ReportRow, Section, group_by_section};
pub use workbook::{REPORT_FILE, build_report_workbook, write_report_workbook};
