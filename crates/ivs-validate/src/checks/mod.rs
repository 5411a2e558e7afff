//! Field checks over a reconciled table.
//!
//! Each check is a free `check` function returning its issues. None of them
//! mutate the table or carry state across rows.

pub mod certificate;
pub mod cut_grade;
pub mod mandatory;
pub mod membership;
pub mod numeric;
pub mod price;

use std::collections::BTreeMap;
use std::time::Instant;

use ivs_model::{Issue, ReconciledTable, Stage};
use ivs_rules::RuleSet;

use crate::column_reader::ColumnReader;
use crate::config::CheckConfig;

/// Issues keyed by the stage that produced them.
pub type StageIssues = BTreeMap<Stage, Vec<Issue>>;

/// Run every synchronous stage (all but reachability).
pub fn run_field_checks(
    table: &ReconciledTable,
    rules: &RuleSet,
    config: &CheckConfig,
) -> StageIssues {
    let reader = ColumnReader::new(table);
    let mut stages = StageIssues::new();

    // 1. Mandatory presence
    run_stage(&mut stages, Stage::Mandatory, || {
        mandatory::check(&reader, &config.mandatory_fields)
    });

    // 2. Numeric sign and bounds
    run_stage(&mut stages, Stage::Numeric, || numeric::check(&reader, config));

    // 3. Value membership
    run_stage(&mut stages, Stage::Value, || {
        membership::check(&reader, &rules.values)
    });

    // 4. Missing cut grade
    run_stage(&mut stages, Stage::CutGrade, || {
        cut_grade::check(&reader, &config.cut_grade_fields)
    });

    // 5. Cross-field price consistency
    run_stage(&mut stages, Stage::CrossField, || price::check(&reader, config));

    // 6. Certificate link format
    run_stage(&mut stages, Stage::Format, || {
        certificate::check(&reader, &config.certificate)
    });

    stages
}

fn run_stage(stages: &mut StageIssues, stage: Stage, check: impl FnOnce() -> Vec<Issue>) {
    let start = Instant::now();
    let issues = check();
    tracing::info!(
        stage = stage.label(),
        issues = issues.len(),
        duration_us = start.elapsed().as_micros() as u64,
        "Stage complete"
    );
    stages.insert(stage, issues);
}
