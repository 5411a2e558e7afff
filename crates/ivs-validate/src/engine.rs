//! The validation pipeline.
//!
//! reconcile → field checks → reachability → aggregate. Rules and config are
//! read-only for the whole run, so one [`Engine`] can serve many tables.

use std::sync::Arc;
use std::time::Instant;

use ivs_model::{RawTable, ReconciledTable, Stage};
use ivs_probe::{Probe, check_reachability};
use ivs_rules::RuleSet;

use crate::aggregate::aggregate;
use crate::checks::{StageIssues, run_field_checks};
use crate::config::EngineConfig;
use crate::reconcile::reconcile;
use crate::report::ValidationReport;

/// Per-run switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Skip the reachability stage entirely.
    pub skip_reachability: bool,
}

/// Validates supplier tables against a shared rule set.
#[derive(Debug, Clone)]
pub struct Engine {
    rules: Arc<RuleSet>,
    config: EngineConfig,
    options: EngineOptions,
}

impl Engine {
    pub fn new(rules: Arc<RuleSet>, config: EngineConfig) -> Self {
        Self {
            rules,
            config,
            options: EngineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Validate a table, probing URLs through `prober` unless skipped.
    pub async fn run<P: Probe>(&self, raw: RawTable, prober: &P) -> ValidationReport {
        let start = Instant::now();
        let table = reconcile(raw, &self.rules.headers);
        let mut stages = run_field_checks(&table, &self.rules, &self.config.checks);

        if !self.options.skip_reachability {
            let reachability = check_reachability(&table, &self.config.probe, prober).await;
            stages.insert(Stage::Url, reachability.issues());
        }

        self.finish(&table, stages, self.options.skip_reachability, start)
    }

    /// Validate a table without any network access.
    pub fn run_offline(&self, raw: RawTable) -> ValidationReport {
        let start = Instant::now();
        let table = reconcile(raw, &self.rules.headers);
        let stages = run_field_checks(&table, &self.rules, &self.config.checks);
        self.finish(&table, stages, true, start)
    }

    fn finish(
        &self,
        table: &ReconciledTable,
        stages: StageIssues,
        reachability_skipped: bool,
        start: Instant,
    ) -> ValidationReport {
        if reachability_skipped {
            tracing::info!("Reachability check skipped");
        }

        let mut report = ValidationReport::for_table(table, &self.config.checks.stock_field);
        report.reachability_skipped = reachability_skipped;
        report.add(aggregate(stages));

        tracing::info!(
            rows = report.row_count,
            issues = report.len(),
            unknown_headers = report.unknown_headers.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Validation complete"
        );
        report
    }
}
