//! Report and table rendering for the CLI.

use std::path::Path;

use bids_validate::{DatasetValidationConfig, ValidationCheck, ValidationResult};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use crate::cli::ReportFormatArg;

/// JSON view of a validation result, including the derived counts.
#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub root: &'a Path,
    pub all_passed: bool,
    pub passed_count: usize,
    pub failed_count: usize,
    pub checks: &'a [ValidationCheck],
}

impl<'a> From<&'a ValidationResult> for JsonReport<'a> {
    fn from(result: &'a ValidationResult) -> Self {
        Self {
            root: result.root(),
            all_passed: result.all_passed(),
            passed_count: result.passed_count(),
            failed_count: result.failed_count(),
            checks: result.checks(),
        }
    }
}

/// Render a result in the requested format.
pub fn render_report(result: &ValidationResult, format: ReportFormatArg) -> anyhow::Result<String> {
    match format {
        ReportFormatArg::Text => Ok(result.summary()),
        ReportFormatArg::Json => Ok(serde_json::to_string_pretty(&JsonReport::from(result))?),
    }
}

/// Table of dataset families and what each one expects.
pub fn datasets_table(configs: &[DatasetValidationConfig]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Check"),
        header_cell("Search dir"),
        header_cell("Pattern"),
        header_cell("Expected"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);

    for config in configs {
        table.add_row(vec![
            dataset_cell(&config.name),
            Cell::new(&config.description),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
        ]);
        for file in &config.required_files {
            table.add_row(vec![
                Cell::new(""),
                Cell::new("required file"),
                Cell::new("."),
                Cell::new(file),
                Cell::new(1),
            ]);
        }
        if let Some(subjects) = config.expected_subjects {
            table.add_row(vec![
                Cell::new(""),
                Cell::new("subjects"),
                Cell::new("."),
                Cell::new("sub-*"),
                Cell::new(subjects),
            ]);
        }
        for expectation in &config.expectations {
            table.add_row(vec![
                Cell::new(""),
                Cell::new(&expectation.name),
                Cell::new(expectation.search_dir.display()),
                Cell::new(&expectation.pattern),
                Cell::new(expectation.expected_count),
            ]);
        }
        if let Some(archive) = &config.archive {
            table.add_row(vec![
                Cell::new(""),
                Cell::new("archive md5"),
                dim_cell("-"),
                Cell::new(archive.path.display()),
                Cell::new(&archive.md5).fg(Color::DarkGrey),
            ]);
        }
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dataset_cell(name: &str) -> Cell {
    Cell::new(name)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}
