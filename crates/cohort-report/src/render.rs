//! Grid table rendering.

use cohort_ingest::{CohortStatistic, round_rate};
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table, TableComponent};

/// Header of the single-column table listing every combination.
pub const ALL_COMBINATIONS_HEADER: &str = "Condition Combination";

/// Headers of the valid-combinations table for a sample threshold.
pub fn valid_headers(min_sample: usize) -> [String; 3] {
    [
        format!("Conditions with sample size over {min_sample}"),
        "Sample Size".to_string(),
        "Mortality Rate".to_string(),
    ]
}

fn grid_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_style(TableComponent::LeftBorderIntersections, '+')
        .set_style(TableComponent::RightBorderIntersections, '+')
        .set_content_arrangement(ContentArrangement::Disabled);
    table
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn rate_cell(rate: Option<f64>) -> Cell {
    match rate {
        Some(rate) => Cell::new(format!("{:.2}", round_rate(rate))),
        None => Cell::new("n/a"),
    }
}

/// Renders one condition per row under [`ALL_COMBINATIONS_HEADER`].
pub fn render_all_combinations<S: AsRef<str>>(conditions: &[S]) -> String {
    let mut table = grid_table();
    table.set_header(vec![Cell::new(ALL_COMBINATIONS_HEADER)]);
    for condition in conditions {
        table.add_row(vec![Cell::new(condition.as_ref())]);
    }
    table.to_string()
}

/// Renders condition, sample size, and mortality rate for accepted cohorts.
pub fn render_valid_combinations(stats: &[CohortStatistic], min_sample: usize) -> String {
    let mut table = grid_table();
    table.set_header(valid_headers(min_sample).into_iter().map(Cell::new));
    for stat in stats {
        table.add_row(vec![
            Cell::new(&stat.condition),
            Cell::new(stat.sample_size),
            rate_cell(stat.mortality_rate),
        ]);
    }
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    table.to_string()
}
