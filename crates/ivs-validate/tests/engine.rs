//! End-to-end engine runs against scripted probes.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use ivs_model::{ProbeOutcome, RawTable, RawValue, Stage, UrlStatus};
use ivs_probe::Probe;
use ivs_rules::{HeaderRuleRow, RuleSet, ValueRuleRow};
use ivs_validate::{Engine, EngineConfig, EngineOptions};
use proptest::prelude::*;

const HEADERS: [&str; 12] = [
    "Stock #",
    "Shp",
    "Color",
    "Clarity",
    "Lab",
    "Carat",
    "Price/Ct",
    "Total Price",
    "Cut",
    "Image",
    "Video",
    "Certificate",
];

/// Returns scripted outcomes, 200 for unknown URLs, after a URL-dependent delay.
#[derive(Default)]
struct ScriptedProbe {
    outcomes: HashMap<String, ProbeOutcome>,
    calls: AtomicUsize,
}

impl ScriptedProbe {
    fn with(mut self, url: &str, outcome: ProbeOutcome) -> Self {
        self.outcomes.insert(url.to_string(), outcome);
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Probe for ScriptedProbe {
    async fn probe(&self, url: &str) -> ProbeOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = (url.len() % 4) as u64 * 3;
        tokio::time::sleep(Duration::from_millis(delay)).await;
        self.outcomes
            .get(url)
            .cloned()
            .unwrap_or(ProbeOutcome::Status(200))
    }
}

fn rules() -> Arc<RuleSet> {
    Arc::new(RuleSet::from_rows(
        &[
            HeaderRuleRow::new("stock_num", "Stock #, Stock No"),
            HeaderRuleRow::new("shape", "Shp"),
            HeaderRuleRow::new("color", ""),
            HeaderRuleRow::new("clarity", ""),
            HeaderRuleRow::new("lab", ""),
            HeaderRuleRow::new("carat", ""),
            HeaderRuleRow::new("price_per_carat", "Price/Ct"),
            HeaderRuleRow::new("total_sales_price", "Total Price"),
            HeaderRuleRow::new("cut_grade", "Cut"),
            HeaderRuleRow::new("image_url_1", "Image"),
            HeaderRuleRow::new("video_url_1", "Video"),
            HeaderRuleRow::new("cert_url_1", "Certificate"),
        ],
        &[
            ValueRuleRow::new("shape", "Round", "RD, BR"),
            ValueRuleRow::new("color", "D", ""),
            ValueRuleRow::new("color", "E", ""),
            ValueRuleRow::new("clarity", "Any", ""),
            ValueRuleRow::new("lab", "GIA", ""),
        ],
    ))
}

fn engine() -> Engine {
    Engine::new(rules(), EngineConfig::default())
}

fn valid_row(stock: &str) -> Vec<RawValue> {
    vec![
        stock.into(),
        "Round".into(),
        "D".into(),
        "VS1".into(),
        "GIA".into(),
        "1.0".into(),
        "100.0".into(),
        "100.00".into(),
        "Excellent".into(),
        format!("https://img.test/{stock}.jpg").into(),
        format!("https://vid.test/{stock}.mp4").into(),
        format!("https://cert.test/{stock}.pdf").into(),
    ]
}

fn table(rows: Vec<Vec<RawValue>>) -> RawTable {
    RawTable::from_rows(HEADERS.iter().map(|h| h.to_string()).collect(), rows)
}

/// Row 2 has a price mismatch; row 3 has one defect per remaining stage.
fn defective_table() -> RawTable {
    let mut mismatch = valid_row("A1");
    mismatch[7] = "105.00".into();

    let mut broken = valid_row("B2");
    broken[0] = RawValue::Empty;
    broken[1] = "Blob".into();
    broken[5] = "-1".into();
    broken[6] = RawValue::Empty;
    broken[8] = "  ".into();
    broken[9] = RawValue::Empty;
    broken[10] = "https://vid.test/dead.mp4".into();
    broken[11] = "https://cert.test/B2.jpg".into();

    table(vec![mismatch, broken])
}

fn summary(report: &ivs_validate::ValidationReport) -> Vec<(&'static str, usize, String)> {
    report
        .issues
        .iter()
        .map(|issue| (issue.tag(), issue.row, issue.column_name().to_string()))
        .collect()
}

#[tokio::test]
async fn test_clean_table_has_no_issues() {
    let probe = ScriptedProbe::default();
    let report = engine()
        .run(table(vec![valid_row("A1"), valid_row("A2")]), &probe)
        .await;

    assert!(report.is_empty(), "unexpected issues: {:?}", report.issues);
    assert_eq!(report.row_count, 2);
    assert!(report.unknown_headers.is_empty());
    assert!(!report.reachability_skipped);
    // image and video per row, certificates are exempt
    assert_eq!(probe.calls(), 4);
}

#[tokio::test]
async fn test_issues_follow_stage_order() {
    let probe = ScriptedProbe::default().with(
        "https://vid.test/dead.mp4",
        ProbeOutcome::Status(404),
    );
    let report = engine().run(defective_table(), &probe).await;

    assert_eq!(
        summary(&report),
        vec![
            ("missing_mandatory", 3, "stock_num".to_string()),
            ("missing_mandatory", 3, "image_url_1".to_string()),
            ("non_positive", 3, "carat".to_string()),
            ("invalid_value", 3, "shape".to_string()),
            ("url_not_provided", 3, "image_url_1".to_string()),
            ("url_not_working", 3, "video_url_1".to_string()),
            ("missing_cut_grade", 3, "cut_grade".to_string()),
            ("price_mismatch", 2, "total_sales_price".to_string()),
            ("certificate_format", 3, "cert_url_1".to_string()),
        ]
    );

    let mismatch = &report.issues[7];
    assert_eq!(mismatch.value.as_deref(), Some("105.00"));
    assert!(mismatch.detail().contains("100.0"));
    assert_eq!(report.issues[5].detail(), "URL not working (HTTP 404)");

    assert_eq!(report.row_label(2), "A1");
    assert_eq!(report.row_label(3), "Row 3");
    assert_eq!(report.stage_counts[&Stage::Url], 2);
    assert_eq!(report.stage_counts[&Stage::Mandatory], 2);
}

#[tokio::test]
async fn test_counters_from_report() {
    let probe = ScriptedProbe::default().with(
        "https://vid.test/dead.mp4",
        ProbeOutcome::Failed("timeout".into()),
    );
    let counters = engine().run(defective_table(), &probe).await.counters();

    assert_eq!(counters.missing("stock_num"), 1);
    assert_eq!(counters.invalid("shape"), 1);
    assert_eq!(counters.invalid("carat"), 1);
    assert_eq!(counters.url("image_url_1", UrlStatus::NotProvided), 1);
    assert_eq!(counters.url("video_url_1", UrlStatus::NotWorking), 1);
    assert_eq!(counters.bad_format("cert_url_1"), 1);
    assert_eq!(counters.price_mismatch, 1);
    assert_eq!(counters.missing_cut_grade, 1);
    assert!(counters.invalid_shapes.contains("Blob"));
}

#[tokio::test]
async fn test_runs_are_deterministic() {
    let rows: Vec<_> = (0..30)
        .map(|i| {
            let mut row = valid_row(&format!("S{i}"));
            if i % 3 == 0 {
                row[9] = format!("https://img.test/missing-{i}.jpg").into();
            }
            row
        })
        .collect();
    let probe = (0..30).step_by(3).fold(ScriptedProbe::default(), |probe, i| {
        probe.with(
            &format!("https://img.test/missing-{i}.jpg"),
            ProbeOutcome::Status(404),
        )
    });

    let engine = engine();
    let first = engine.run(table(rows.clone()), &probe).await;
    let second = engine.run(table(rows), &probe).await;

    assert_eq!(first.len(), 10);
    assert_eq!(first.issues, second.issues);
    let rows: Vec<_> = first.issues.iter().map(|i| i.row).collect();
    assert!(rows.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn test_skip_reachability_makes_no_requests() {
    let probe = ScriptedProbe::default();
    let engine = engine().with_options(EngineOptions {
        skip_reachability: true,
    });
    let report = engine.run(defective_table(), &probe).await;

    assert_eq!(probe.calls(), 0);
    assert!(report.reachability_skipped);
    assert_eq!(report.issues_for(Stage::Url).count(), 0);
    // every other stage still runs
    assert_eq!(report.len(), 7);
}

#[test]
fn test_run_offline() {
    let report = engine().run_offline(defective_table());
    assert!(report.reachability_skipped);
    assert_eq!(report.issues_for(Stage::Url).count(), 0);
    assert_eq!(report.issues_for(Stage::Format).count(), 1);
}

#[test]
fn test_absent_mandatory_column_flags_every_row() {
    let headers: Vec<String> = HEADERS
        .iter()
        .filter(|h| **h != "Lab")
        .map(|h| h.to_string())
        .collect();
    let rows = [valid_row("A1"), valid_row("A2")]
        .into_iter()
        .map(|mut row| {
            row.remove(4);
            row
        })
        .collect();
    let report = engine().run_offline(RawTable::from_rows(headers, rows));

    let missing: Vec<_> = report.issues_for(Stage::Mandatory).collect();
    assert_eq!(missing.len(), 2);
    assert!(missing.iter().all(|i| i.column_name() == "lab" && i.value.is_none()));
    assert_eq!(missing[0].detail(), "Mandatory column is missing from the file");
}

#[test]
fn test_wildcard_accepts_any_value() {
    let mut row = valid_row("A1");
    row[3] = "Something Odd".into();
    let report = engine().run_offline(table(vec![row]));
    assert!(report.is_empty());
}

#[test]
fn test_value_variations_and_case() {
    let mut row = valid_row("A1");
    row[1] = " br ".into();
    row[2] = "e".into();
    let report = engine().run_offline(table(vec![row]));
    assert!(report.is_empty(), "unexpected issues: {:?}", report.issues);
}

#[test]
fn test_unknown_and_duplicate_headers() {
    let mut headers: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    headers.push("Fluorescence".to_string());
    headers.push("Stock No".to_string());
    let mut row = valid_row("A1");
    row.push("None".into());
    row.push("Z9".into());

    let report = engine().run_offline(RawTable::from_rows(headers, vec![row]));
    assert_eq!(report.unknown_headers, vec!["Fluorescence"]);
    assert_eq!(report.replaced_headers, vec!["Stock #"]);
    assert_eq!(report.stock_numbers, vec![Some("Z9".to_string())]);
}

#[test]
fn test_unknown_column_values_not_checked() {
    let mut headers: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    headers.push("Fluorescence".to_string());
    let mut row = valid_row("A1");
    row.push("Glowing".into());

    let rules = RuleSet::from_rows(
        &[HeaderRuleRow::new("stock_num", "Stock #")],
        &[ValueRuleRow::new("fluorescence", "None", "Faint, Medium")],
    );
    let mut config = EngineConfig::default();
    config.checks.mandatory_fields = vec!["stock_num".to_string()];
    let report = Engine::new(Arc::new(rules), config)
        .run_offline(RawTable::from_rows(headers, vec![row]));

    assert!(report.unknown_headers.contains(&"Fluorescence".to_string()));
    assert_eq!(report.issues_for(Stage::Value).count(), 0);
}

#[test]
fn test_weight_bounds_and_sign() {
    let mut heavy = valid_row("A1");
    heavy[5] = "25".into();
    heavy[7] = "2500.00".into();
    let mut zero = valid_row("A2");
    zero[5] = "0".into();
    zero[7] = "0.00".into();
    let mut garbled = valid_row("A3");
    garbled[5] = "abc".into();
    let mut negative_price = valid_row("A4");
    negative_price[6] = "-5".into();
    negative_price[7] = "-5.00".into();

    let report = engine().run_offline(table(vec![heavy, zero, garbled, negative_price]));
    let numeric: Vec<_> = report
        .issues_for(Stage::Numeric)
        .map(|issue| (issue.tag(), issue.row, issue.column_name().to_string()))
        .collect();
    assert_eq!(
        numeric,
        vec![
            ("out_of_bounds", 2, "carat".to_string()),
            ("non_positive", 3, "carat".to_string()),
            ("non_positive", 5, "price_per_carat".to_string()),
            ("non_positive", 5, "total_sales_price".to_string()),
        ]
    );
    assert_eq!(report.counters().invalid("carat"), 2);
}

#[test]
fn test_price_within_tolerance() {
    let mut row = valid_row("A1");
    row[5] = "0.333".into();
    row[6] = "3000".into();
    row[7] = "$999.00".into();
    let report = engine().run_offline(table(vec![row]));
    assert!(report.is_empty(), "unexpected issues: {:?}", report.issues);
}

proptest! {
    #[test]
    fn prop_issues_grouped_by_stage_then_row(
        cells in proptest::collection::vec(
            (
                prop_oneof![Just("Round"), Just("Blob"), Just("")],
                prop_oneof![Just("1.0"), Just("-2"), Just("25"), Just("x")],
                prop_oneof![Just("100.00"), Just("7"), Just("")],
            ),
            0..12,
        )
    ) {
        let rows = cells
            .iter()
            .enumerate()
            .map(|(i, (shape, carat, total))| {
                let mut row = valid_row(&format!("P{i}"));
                row[1] = (*shape).into();
                row[5] = (*carat).into();
                row[7] = (*total).into();
                row
            })
            .collect();
        let report = engine().run_offline(table(rows));

        let keys: Vec<_> = report.issues.iter().map(|i| (i.stage(), i.row)).collect();
        prop_assert!(keys.windows(2).all(|w| w[0] <= w[1]));
        prop_assert_eq!(report.stage_counts.values().sum::<usize>(), report.len());
    }
}
