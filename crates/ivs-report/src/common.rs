//! Shared helpers for report output.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Longest worksheet name spreadsheet tools accept.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Strip characters spreadsheet tools reject in sheet names and cap the length.
pub fn sanitize_sheet_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '\\' | '/' | '?' | '*' | '[' | ']' | ':'))
        .take(MAX_SHEET_NAME_LEN)
        .collect()
}

/// Ensure a parent directory exists for a file path.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    Ok(())
}
