//! Validation report.

use std::collections::BTreeMap;

use ivs_common::is_empty;
use ivs_model::{Category, Issue, ReconciledTable, Stage, source_row_number};
use serde::{Deserialize, Serialize};

use crate::counters::IssueCounters;

/// Everything a validation run found, ready for rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Aggregated issues in stage order.
    pub issues: Vec<Issue>,
    /// Supplier headers that matched no canonical field, in source order.
    pub unknown_headers: Vec<String>,
    /// Source headers whose columns were replaced by a later duplicate.
    pub replaced_headers: Vec<String>,
    pub row_count: usize,
    /// Stock number per data row, `None` when empty or the column is absent.
    pub stock_numbers: Vec<Option<String>>,
    pub stage_counts: BTreeMap<Stage, usize>,
    /// Reachability was not checked, so URL issues are absent.
    pub reachability_skipped: bool,
}

impl ValidationReport {
    /// Build a report shell carrying the table facts renderers need.
    pub fn for_table(table: &ReconciledTable, stock_field: &str) -> Self {
        let stock_numbers = match table.column(stock_field) {
            Some(column) => column
                .cells
                .iter()
                .map(|raw| {
                    if is_empty(raw) {
                        None
                    } else {
                        Some(raw.to_string().trim().to_string())
                    }
                })
                .collect(),
            None => vec![None; table.row_count()],
        };
        Self {
            unknown_headers: table.unknown_headers(),
            replaced_headers: table.replaced_headers().to_vec(),
            row_count: table.row_count(),
            stock_numbers,
            ..Self::default()
        }
    }

    /// Append aggregated issues and refresh the per-stage counts.
    pub fn add(&mut self, issues: impl IntoIterator<Item = Issue>) {
        self.issues.extend(issues);
        self.stage_counts = Stage::all().iter().map(|stage| (*stage, 0)).collect();
        for issue in &self.issues {
            *self.stage_counts.entry(issue.stage()).or_default() += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues from one stage, in report order.
    pub fn issues_for(&self, stage: Stage) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |issue| issue.stage() == stage)
    }

    pub fn count_by_category(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for issue in &self.issues {
            *counts.entry(issue.category()).or_default() += 1;
        }
        counts
    }

    /// Stock number for a source row, or `Row N` when there is none.
    pub fn row_label(&self, row: usize) -> String {
        row.checked_sub(source_row_number(0))
            .and_then(|idx| self.stock_numbers.get(idx))
            .and_then(Option::as_deref)
            .map_or_else(|| format!("Row {row}"), str::to_string)
    }

    pub fn counters(&self) -> IssueCounters {
        IssueCounters::from_issues(&self.issues)
    }
}
