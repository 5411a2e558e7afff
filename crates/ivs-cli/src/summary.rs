use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};
use ivs_model::{Category, Issue, Stage};
use ivs_validate::ValidationReport;

use crate::commands::ValidateResult;

pub fn print_summary(result: &ValidateResult, sample: usize) {
    let report = &result.report;
    println!("Table: {}", result.table.display());
    println!("Rows: {}", report.row_count);
    if report.unknown_headers.is_empty() {
        println!("Unknown headers: none");
    } else {
        println!("Unknown headers: {}", report.unknown_headers.join(", "));
    }
    if !report.replaced_headers.is_empty() {
        println!(
            "Replaced by a later duplicate: {}",
            report.replaced_headers.join(", ")
        );
    }
    if report.reachability_skipped {
        println!("URL reachability: skipped");
    }

    print_stage_table(report);
    if sample > 0 {
        print_sample_table(report, sample);
    }

    let artifacts = &result.artifacts;
    if let Some(path) = &artifacts.report {
        println!("Issue report: {}", path.display());
    }
    if let Some(path) = &artifacts.email {
        println!("Email summary: {}", path.display());
    }
    if let Some(path) = &artifacts.json {
        println!("JSON issues: {}", path.display());
    }
}

fn print_stage_table(report: &ValidationReport) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Issues")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for stage in Stage::all() {
        let count = report.stage_counts.get(stage).copied().unwrap_or(0);
        let count_cell = if *stage == Stage::Url && report.reachability_skipped {
            dim_cell("skipped")
        } else {
            count_cell(count)
        };
        table.add_row(vec![Cell::new(stage.label()), count_cell]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(report.len()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

fn print_sample_table(report: &ValidationReport, sample: usize) {
    if report.is_empty() {
        println!("No issues found.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Row"),
        header_cell("Stock No."),
        header_cell("Column"),
        header_cell("Issue"),
        header_cell("Value"),
        header_cell("Details"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for stage in Stage::all() {
        for issue in report.issues_for(*stage).take(sample) {
            table.add_row(issue_row(report, issue));
        }
    }
    println!();
    println!("Sample issues (up to {sample} per stage):");
    println!("{table}");
}

fn issue_row(report: &ValidationReport, issue: &Issue) -> Vec<Cell> {
    vec![
        Cell::new(issue.stage().label()),
        Cell::new(issue.row),
        Cell::new(report.row_label(issue.row)),
        Cell::new(issue.column_name()),
        Cell::new(issue.kind.label()).fg(category_color(issue.category())),
        issue
            .value
            .as_deref()
            .map_or_else(|| dim_cell("-"), Cell::new),
        Cell::new(issue.detail()),
    ]
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(60);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 7 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(12)),
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Fixed(16)),
            ColumnConstraint::UpperBoundary(Width::Fixed(20)),
            ColumnConstraint::UpperBoundary(Width::Fixed(14)),
            ColumnConstraint::UpperBoundary(Width::Percentage(25)),
            ColumnConstraint::UpperBoundary(Width::Percentage(40)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn category_color(category: Category) -> Color {
    match category {
        Category::Missing | Category::PriceMismatch => Color::Red,
        Category::Invalid | Category::Range => Color::Yellow,
        Category::Url => Color::Magenta,
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Red).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
