use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::Table;
use ivs_cli::pipeline::{Artifacts, build_engine, load_rules, validate_table, write_artifacts};
use ivs_probe::HttpProber;
use ivs_validate::ValidationReport;

use crate::cli::{RulesArgs, ValidateArgs};
use crate::summary::apply_table_style;

#[derive(Debug)]
pub struct ValidateResult {
    pub table: PathBuf,
    pub report: ValidationReport,
    pub artifacts: Artifacts,
}

pub async fn run_validate(args: &ValidateArgs) -> Result<ValidateResult> {
    let engine = build_engine(&args.rules, args.config.as_deref(), args.skip_urls)?;
    let prober = HttpProber::new(&engine.config().probe).context("build HTTP prober")?;
    let report = validate_table(&engine, &args.table, &prober).await?;
    let artifacts = write_artifacts(
        &report,
        args.supplier_name.as_deref(),
        args.output_dir.as_deref(),
        args.json.as_deref(),
    )?;
    Ok(ValidateResult {
        table: args.table.clone(),
        report,
        artifacts,
    })
}

pub fn run_rules(args: &RulesArgs) -> Result<()> {
    let rules = load_rules(&args.rules)?;
    let mut table = Table::new();
    table.set_header(vec!["Field", "Synonyms", "Values"]);
    apply_table_style(&mut table);
    for field in rules.headers.fields() {
        let values = match rules.values.get(field) {
            Some(rule) if rule.is_wildcard() => "wildcard".to_string(),
            Some(rule) => format!("{} accepted", rule.accepted_count()),
            None => "-".to_string(),
        };
        table.add_row(vec![
            field.to_string(),
            rules.headers.synonym_count(field).to_string(),
            values,
        ]);
    }
    println!("{table}");

    let orphans: Vec<_> = rules
        .values
        .fields()
        .into_iter()
        .filter(|field| !rules.headers.fields().contains(field))
        .map(ToString::to_string)
        .collect();
    if !orphans.is_empty() {
        println!("Value rules without a column rule: {}", orphans.join(", "));
    }
    for collision in rules.headers.collisions() {
        println!(
            "Synonym '{}' maps to both {} and {} (using {})",
            collision.synonym, collision.previous, collision.current, collision.current
        );
    }
    Ok(())
}
