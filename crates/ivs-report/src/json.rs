//! JSON issue export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use ivs_validate::ValidationReport;
use serde::Serialize;

use crate::common::ensure_parent_dir;

/// Flat, self-describing issue record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueRecord {
    pub row: usize,
    pub stock_no: String,
    pub column: Option<String>,
    pub value: Option<String>,
    pub category: String,
    pub tag: &'static str,
    pub issue_type: &'static str,
    pub stage: String,
    pub details: String,
}

/// Issue records in report order.
pub fn issue_records(report: &ValidationReport) -> Vec<IssueRecord> {
    report
        .issues
        .iter()
        .map(|issue| IssueRecord {
            row: issue.row,
            stock_no: report.row_label(issue.row),
            column: issue.column.as_ref().map(ToString::to_string),
            value: issue.value.clone(),
            category: issue.category().to_string(),
            tag: issue.tag(),
            issue_type: issue.kind.label(),
            stage: issue.stage().to_string(),
            details: issue.detail(),
        })
        .collect()
}

/// Serialize the issue records as a pretty-printed JSON array.
pub fn issues_to_json(report: &ValidationReport) -> Result<String> {
    serde_json::to_string_pretty(&issue_records(report)).context("serialize issues")
}

/// Write the issue records to `path`.
pub fn write_json(report: &ValidationReport, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &issue_records(report))
        .with_context(|| format!("write {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    tracing::info!(path = %path.display(), issues = report.len(), "Wrote JSON issue export");
    Ok(())
}
