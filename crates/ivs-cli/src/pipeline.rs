//! One validation pass: load rules and config, load the supplier table, run
//! the engine, and write the requested artifacts.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use ivs_ingest::load_supplier_table;
use ivs_probe::Probe;
use ivs_report::{REPORT_FILE, build_email_body, write_json, write_report_workbook};
use ivs_rules::{RuleSet, load_rule_set};
use ivs_validate::{Engine, EngineConfig, EngineOptions, ValidationReport};
use tracing::Instrument;

/// File name of the supplier email inside the output directory.
pub const EMAIL_FILE: &str = "Supplier Email.txt";

/// Supplier name used when none is given.
pub const DEFAULT_SUPPLIER: &str = "Supplier";

/// Load the rule table from a workbook or CSV directory.
pub fn load_rules(path: &Path) -> Result<Arc<RuleSet>> {
    let rules =
        load_rule_set(path).with_context(|| format!("load rule table {}", path.display()))?;
    Ok(Arc::new(rules))
}

/// Load the engine configuration, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            EngineConfig::load(path).with_context(|| format!("load config {}", path.display()))
        }
        None => Ok(EngineConfig::default()),
    }
}

/// Build an engine from a rule table and optional config file.
pub fn build_engine(rules: &Path, config: Option<&Path>, skip_urls: bool) -> Result<Engine> {
    let engine = Engine::new(load_rules(rules)?, load_config(config)?).with_options(
        EngineOptions {
            skip_reachability: skip_urls,
        },
    );
    Ok(engine)
}

/// Load a supplier table and validate it.
pub async fn validate_table<P: Probe>(
    engine: &Engine,
    table: &Path,
    prober: &P,
) -> Result<ValidationReport> {
    let raw = load_supplier_table(table)
        .with_context(|| format!("load supplier table {}", table.display()))?;
    let report = engine
        .run(raw, prober)
        .instrument(tracing::info_span!("validate", table = %table.display()))
        .await;
    Ok(report)
}

/// Where the renderers wrote their output.
#[derive(Debug, Clone, Default)]
pub struct Artifacts {
    pub report: Option<PathBuf>,
    pub email: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

/// Write the report workbook and supplier email into `output_dir`, and the
/// JSON export to `json`, for whichever are given.
pub fn write_artifacts(
    report: &ValidationReport,
    supplier_name: Option<&str>,
    output_dir: Option<&Path>,
    json: Option<&Path>,
) -> Result<Artifacts> {
    let mut artifacts = Artifacts::default();

    if let Some(dir) = output_dir {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        let path = dir.join(REPORT_FILE);
        write_report_workbook(report, &path)?;
        artifacts.report = Some(path);

        let body = build_email_body(
            supplier_name.unwrap_or(DEFAULT_SUPPLIER),
            &report.counters(),
        );
        let path = dir.join(EMAIL_FILE);
        fs::write(&path, body).with_context(|| format!("write {}", path.display()))?;
        artifacts.email = Some(path);
    }

    if let Some(path) = json {
        write_json(report, path)?;
        artifacts.json = Some(path.to_path_buf());
    }

    Ok(artifacts)
}
