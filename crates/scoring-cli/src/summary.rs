//! Human-readable tables written alongside the JSON output.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use scoring_core::ProcessSummary;
use scoring_map::{MatchKind, Resolution};
use scoring_model::ColumnProfile;
use scoring_standards::CountryTable;

const SAMPLE_PREVIEW: usize = 3;

/// Per-column detection scores, to stderr.
pub fn print_profiles(profiles: &[ColumnProfile]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Non-empty"),
        header_cell("Country"),
        header_cell("Indicator"),
        header_cell("Samples"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for profile in profiles {
        let samples = profile
            .sample_values
            .iter()
            .take(SAMPLE_PREVIEW)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(&profile.name).add_attribute(Attribute::Bold),
            Cell::new(profile.non_empty),
            score_cell(profile.country_score),
            score_cell(profile.indicator_score),
            if samples.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(samples)
            },
        ]);
    }
    eprintln!("{table}");
}

/// Stage-two row counts, to stderr.
pub fn print_process_summary(summary: &ProcessSummary) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Rows"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows = [
        ("Rows read", summary.rows, None),
        ("Resolved", summary.resolved, None),
        ("Unresolved", summary.unresolved, Some(Color::Yellow)),
        ("Non-African", summary.non_african, None),
        ("Missing values", summary.skipped_missing_values, Some(Color::Yellow)),
    ];
    for (label, count, color) in rows {
        table.add_row(vec![Cell::new(label), count_cell(count, color)]);
    }
    table.add_row(vec![
        Cell::new("Records")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.records).add_attribute(Attribute::Bold),
    ]);
    eprintln!("{table}");
}

/// Resolution results, to stdout.
pub fn print_resolutions(texts: &[String], resolutions: &[Resolution]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Input"),
        header_cell("Code"),
        header_cell("Confidence"),
        header_cell("Match"),
        header_cell("Alias"),
        header_cell("African"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Center);
    for (text, resolution) in texts.iter().zip(resolutions) {
        table.add_row(vec![
            Cell::new(text),
            resolution
                .code()
                .map_or_else(|| dim_cell("-"), |code| Cell::new(code).add_attribute(Attribute::Bold)),
            Cell::new(format!("{:.2}", resolution.confidence)),
            match_cell(resolution.kind),
            resolution
                .matched_alias
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
            if !resolution.is_resolved() {
                dim_cell("-")
            } else if resolution.is_african {
                Cell::new("yes").fg(Color::Green)
            } else {
                Cell::new("no").fg(Color::Yellow)
            },
        ]);
    }
    println!("{table}");
}

/// The country table, African codes only unless `all`.
pub fn print_countries(countries: &CountryTable, all: bool) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Name"),
        header_cell("African"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    let mut listed = 0usize;
    for code in countries.codes() {
        let african = countries.is_african(code);
        if !all && !african {
            continue;
        }
        listed += 1;
        table.add_row(vec![
            Cell::new(code).add_attribute(Attribute::Bold),
            Cell::new(countries.display_name(code).unwrap_or(code)),
            if african {
                Cell::new("yes").fg(Color::Green)
            } else {
                dim_cell("no")
            },
        ]);
    }
    println!("{table}");
    println!("{listed} countries");
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}

fn score_cell(score: f64) -> Cell {
    let cell = Cell::new(format!("{score:.2}"));
    if score >= 0.5 {
        cell.fg(Color::Green).add_attribute(Attribute::Bold)
    } else if score > 0.0 {
        cell
    } else {
        cell.fg(Color::DarkGrey)
    }
}

fn count_cell(count: usize, highlight: Option<Color>) -> Cell {
    match highlight {
        Some(color) if count > 0 => Cell::new(count).fg(color),
        _ if count == 0 => dim_cell(count),
        _ => Cell::new(count),
    }
}

fn match_cell(kind: MatchKind) -> Cell {
    let cell = Cell::new(kind.as_str());
    match kind {
        MatchKind::Exact => cell.fg(Color::Green),
        MatchKind::Fuzzy => cell.fg(Color::Yellow),
        MatchKind::Unresolved => cell.fg(Color::Red),
    }
}

fn apply_table_style(table: &mut Table) {
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

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
