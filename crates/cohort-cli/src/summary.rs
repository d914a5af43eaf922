use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cohort_model::Dimension;
use cohort_search::{DomainCatalog, SearchStats};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn size_cell(size: Option<u128>) -> Cell {
    match size {
        Some(size) => Cell::new(size),
        None => Cell::new("overflow").fg(Color::Yellow),
    }
}

pub fn catalog_table(catalog: &DomainCatalog) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Dimension"),
        header_cell("Values"),
        header_cell("Domain"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (index, entry) in catalog.domains().iter().enumerate() {
        let values: Vec<String> = entry.values.iter().map(ToString::to_string).collect();
        table.add_row(vec![
            Cell::new(index),
            Cell::new(&entry.name),
            Cell::new(entry.values.len()),
            Cell::new(values.join(", ")),
        ]);
    }
    table
}

pub fn search_table(rows: &[(&str, SearchStats)]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Search"),
        header_cell("Evaluated"),
        header_cell("Accepted"),
        header_cell("Rejected"),
        header_cell("Pruned"),
        header_cell("Invalid sets"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for (label, stats) in rows {
        table.add_row(vec![
            Cell::new(label).add_attribute(Attribute::Bold),
            Cell::new(stats.evaluated),
            Cell::new(stats.accepted).fg(Color::Green),
            Cell::new(stats.rejected),
            Cell::new(stats.pruned),
            Cell::new(stats.invalid_sets),
        ]);
    }
    table
}

pub fn space_table(levels: &[(usize, Option<u128>)], total: Option<u128>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Subset size"), header_cell("Candidates")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    for (size, count) in levels {
        table.add_row(vec![Cell::new(size), size_cell(*count)]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        size_cell(total).add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn dimensions_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Identifier"), header_cell("Column")]);
    apply_table_style(&mut table);
    for dimension in Dimension::ALL {
        table.add_row(vec![dimension.identifier(), dimension.as_str()]);
    }
    table
}
