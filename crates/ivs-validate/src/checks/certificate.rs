//! Certificate link format.
//!
//! The certificate field is not probed for liveness. Non-empty links must
//! point at a file with an accepted extension.

use ivs_common::is_empty;
use ivs_model::{CanonicalField, Issue, IssueKind, source_row_number};

use crate::column_reader::ColumnReader;
use crate::config::CertificateRule;

/// Path part of a link: query and fragment removed, lowercased.
fn link_path(url: &str) -> String {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    url[..end].trim().to_lowercase()
}

pub fn has_accepted_extension(url: &str, extensions: &[String]) -> bool {
    let path = link_path(url);
    extensions
        .iter()
        .any(|ext| path.ends_with(&ext.trim().to_lowercase()))
}

/// Flag non-empty certificate links without an accepted extension.
pub fn check(reader: &ColumnReader<'_>, rule: &CertificateRule) -> Vec<Issue> {
    if rule.extensions.is_empty() {
        return Vec::new();
    }
    let column = CanonicalField::new(rule.field.as_str());

    reader
        .cells(&rule.field)
        .filter_map(|(row_idx, raw)| {
            if is_empty(raw) {
                return None;
            }
            let url = raw.display()?;
            if has_accepted_extension(&url, &rule.extensions) {
                return None;
            }
            Some(Issue::new(
                source_row_number(row_idx),
                Some(column.clone()),
                Some(url),
                IssueKind::CertificateFormat {
                    expected: rule.extensions.clone(),
                },
            ))
        })
        .collect()
}
