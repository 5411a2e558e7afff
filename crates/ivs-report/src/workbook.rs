//! Issue report workbook.
//!
//! One worksheet per non-empty section, in section order. A report without
//! issues gets a single header-only `No Issues Found` sheet.

use std::path::Path;

use anyhow::{Context, Result};
use ivs_validate::ValidationReport;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::common::{ensure_parent_dir, sanitize_sheet_name};
use crate::section::{NO_ISSUES_SHEET, REPORT_HEADERS, ReportRow, group_by_section};

/// File name of the report workbook inside an output directory.
pub const REPORT_FILE: &str = "Issue Report.xlsx";

const COLUMN_WIDTHS: [f64; 6] = [16.0, 16.0, 20.0, 36.0, 48.0, 8.0];

/// Lay the report out as a workbook without saving it.
pub fn build_report_workbook(report: &ValidationReport) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let sections = group_by_section(report);

    if sections.is_empty() {
        add_sheet(&mut workbook, NO_ISSUES_SHEET, &[], &header_format)?;
        return Ok(workbook);
    }

    for (section, rows) in &sections {
        add_sheet(&mut workbook, section.title(), rows, &header_format)?;
        tracing::debug!(section = %section, rows = rows.len(), "Added report sheet");
    }
    Ok(workbook)
}

/// Write the report workbook to `path`, creating parent directories.
pub fn write_report_workbook(report: &ValidationReport, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut workbook = build_report_workbook(report)?;
    workbook
        .save(path)
        .with_context(|| format!("write {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        issues = report.len(),
        "Wrote issue report workbook"
    );
    Ok(())
}

fn add_sheet(
    workbook: &mut Workbook,
    title: &str,
    rows: &[ReportRow],
    header_format: &Format,
) -> Result<()> {
    let name = sanitize_sheet_name(title);
    let sheet = workbook.add_worksheet();
    sheet
        .set_name(&name)
        .with_context(|| format!("name sheet '{name}'"))?;
    write_rows(sheet, rows, header_format).with_context(|| format!("write sheet '{name}'"))
}

fn write_rows(
    sheet: &mut Worksheet,
    rows: &[ReportRow],
    header_format: &Format,
) -> Result<(), XlsxError> {
    for (col, (header, width)) in (0u16..).zip(REPORT_HEADERS.iter().zip(COLUMN_WIDTHS)) {
        sheet.write_string_with_format(0, col, *header, header_format)?;
        sheet.set_column_width(col, width)?;
    }
    sheet.set_freeze_panes(1, 0)?;

    for (row_num, row) in (1u32..).zip(rows) {
        sheet.write_string(row_num, 0, &row.stock_no)?;
        sheet.write_string(row_num, 1, row.issue_type)?;
        // empty text cells are left blank
        for (col, text) in [(2u16, &row.column), (3, &row.value), (4, &row.details)] {
            if !text.is_empty() {
                sheet.write_string(row_num, col, text)?;
            }
        }
        sheet.write_number(row_num, 5, row.row as f64)?;
    }
    Ok(())
}
