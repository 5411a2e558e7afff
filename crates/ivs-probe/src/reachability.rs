//! Reachability of URL-bearing cells.
//!
//! Every (row, URL column) pair becomes one target. Empty cells are
//! classified `NOT_PROVIDED` without touching the network; the rest are
//! probed with at most `concurrency` requests in flight. Completions arrive
//! in any order and are written into a slot per target, and issues are only
//! built once every probe has finished.

use std::collections::BTreeMap;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use ivs_common::is_empty;
use ivs_model::{
    CanonicalField, Issue, IssueKind, ReconciledTable, UrlProbeResult, UrlStatus,
    source_row_number,
};

use crate::config::ProbeConfig;
use crate::prober::Probe;

/// One cell to check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTarget {
    /// 0-based data row index.
    pub row_idx: usize,
    pub field: CanonicalField,
    /// Trimmed URL, `None` when the cell is empty.
    pub url: Option<String>,
}

/// Columns probed for this table, in reconciled column order.
pub fn url_fields(table: &ReconciledTable, config: &ProbeConfig) -> Vec<CanonicalField> {
    table
        .columns()
        .iter()
        .filter(|c| config.is_url_field(c.field.as_str()))
        .map(|c| c.field.clone())
        .collect()
}

/// Enumerate targets row-major: all URL columns of row 0, then row 1, ...
pub fn collect_targets(table: &ReconciledTable, config: &ProbeConfig) -> Vec<UrlTarget> {
    let columns: Vec<_> = table
        .columns()
        .iter()
        .filter(|c| config.is_url_field(c.field.as_str()))
        .collect();

    let mut targets = Vec::with_capacity(columns.len() * table.row_count());
    for row_idx in 0..table.row_count() {
        for column in &columns {
            let url = column
                .cells
                .get(row_idx)
                .filter(|raw| !is_empty(raw))
                .map(|raw| raw.to_string().trim().to_string());
            targets.push(UrlTarget {
                row_idx,
                field: column.field.clone(),
                url,
            });
        }
    }
    targets
}

/// A target with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbedTarget {
    pub target: UrlTarget,
    pub result: UrlProbeResult,
}

/// Outcome of the reachability stage, in target order.
#[derive(Debug, Clone, Default)]
pub struct ReachabilityReport {
    pub results: Vec<ProbedTarget>,
    counts: BTreeMap<CanonicalField, BTreeMap<UrlStatus, usize>>,
}

impl ReachabilityReport {
    fn new(results: Vec<ProbedTarget>) -> Self {
        let mut counts: BTreeMap<CanonicalField, BTreeMap<UrlStatus, usize>> = BTreeMap::new();
        for probed in &results {
            *counts
                .entry(probed.target.field.clone())
                .or_default()
                .entry(probed.result.status)
                .or_default() += 1;
        }
        Self { results, counts }
    }

    /// Number of cells of a field with a given status.
    pub fn count(&self, field: &str, status: UrlStatus) -> usize {
        self.counts
            .get(field)
            .and_then(|by_status| by_status.get(&status))
            .copied()
            .unwrap_or(0)
    }

    /// Per-field status counts, fields sorted by name.
    pub fn counts(&self) -> &BTreeMap<CanonicalField, BTreeMap<UrlStatus, usize>> {
        &self.counts
    }

    /// Targets that were sent over the network.
    pub fn probed_count(&self) -> usize {
        self.results.iter().filter(|p| p.target.url.is_some()).count()
    }

    /// Issues for every target that is not `WORKING`, in target order.
    pub fn issues(&self) -> Vec<Issue> {
        self.results
            .iter()
            .filter_map(|probed| {
                let kind = match probed.result.status {
                    UrlStatus::Working => return None,
                    UrlStatus::NotProvided => IssueKind::UrlNotProvided,
                    UrlStatus::NotWorking => IssueKind::UrlNotWorking {
                        http_status: probed.result.http_status,
                        reason: probed.result.reason.clone(),
                    },
                };
                Some(Issue::new(
                    source_row_number(probed.target.row_idx),
                    Some(probed.target.field.clone()),
                    probed.target.url.clone(),
                    kind,
                ))
            })
            .collect()
    }
}

/// Probe every URL-bearing cell of the table.
///
/// Returns only after all probes completed. Probe failures are classified
/// `NOT_WORKING`; this function cannot fail.
pub async fn check_reachability<P: Probe>(
    table: &ReconciledTable,
    config: &ProbeConfig,
    prober: &P,
) -> ReachabilityReport {
    let start = Instant::now();
    let targets = collect_targets(table, config);
    let success_statuses = config.success_statuses.as_slice();

    let pending: Vec<(usize, String)> = targets
        .iter()
        .enumerate()
        .filter_map(|(idx, target)| target.url.clone().map(|url| (idx, url)))
        .collect();
    let probe_count = pending.len();

    let completed: Vec<(usize, UrlProbeResult)> = stream::iter(pending)
        .map(|(idx, url)| async move {
            let outcome = prober.probe(&url).await;
            (idx, UrlProbeResult::classify(url, outcome, success_statuses))
        })
        .buffer_unordered(config.effective_concurrency())
        .collect()
        .await;

    let mut slots: Vec<Option<UrlProbeResult>> = vec![None; targets.len()];
    for (idx, result) in completed {
        slots[idx] = Some(result);
    }

    let results = targets
        .into_iter()
        .zip(slots)
        .map(|(target, slot)| ProbedTarget {
            target,
            result: slot.unwrap_or_else(UrlProbeResult::not_provided),
        })
        .collect();
    let report = ReachabilityReport::new(results);

    tracing::info!(
        targets = report.results.len(),
        probed = probe_count,
        concurrency = config.effective_concurrency(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Reachability check complete"
    );
    report
}
