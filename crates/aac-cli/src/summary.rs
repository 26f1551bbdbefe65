use aac_cli::pipeline::{Bootstrap, ViewOutcome};
use aac_cli::report::{model_overview, view_headline};
use aac_output::{ExportTable, ExportValue};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

pub fn print_model_summary(bootstrap: &Bootstrap) {
    for line in model_overview(bootstrap) {
        println!("{line}");
    }
    let model = &bootstrap.model;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Group"),
        header_cell("Key"),
        header_cell("Series"),
        header_cell("Records"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for group in model.groups() {
        let records = model.by_group().get(&group.key).map_or(0, Vec::len);
        table.add_row(vec![
            Cell::new(&group.label).add_attribute(Attribute::Bold),
            dim_cell(&group.key),
            Cell::new(model.series_in_group(&group.key).len()),
            Cell::new(records),
        ]);
    }
    println!("{table}");

    let mut series = Table::new();
    series.set_header(vec![
        header_cell("Series"),
        header_cell("Key"),
        header_cell("Group"),
        header_cell("Units"),
    ]);
    apply_table_style(&mut series);
    for meta in model.series() {
        series.add_row(vec![
            Cell::new(&meta.label),
            dim_cell(&meta.key),
            Cell::new(&meta.group_key),
            Cell::new(&meta.units),
        ]);
    }
    println!();
    println!("{series}");
}

pub fn print_view(outcome: &ViewOutcome) {
    for line in view_headline(&outcome.state) {
        println!("{line}");
    }
    if outcome.table.is_empty() {
        println!("(no rows)");
    } else {
        println!("{}", export_table(&outcome.table));
    }
    if let Some(path) = &outcome.exported {
        println!("Exported: {}", path.display());
    }
}

fn export_table(source: &ExportTable) -> Table {
    let mut table = Table::new();
    table.set_header(source.column_names().into_iter().map(header_cell));
    apply_table_style(&mut table);
    for (idx, column) in source.columns().iter().enumerate() {
        if column.kind.is_numeric() {
            align_column(&mut table, idx, CellAlignment::Right);
        }
    }
    for row in source.rows() {
        table.add_row(source.ordered_values(row).map(|value| match value {
            ExportValue::Missing => dim_cell("-"),
            other => Cell::new(other.to_cell()),
        }));
    }
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).add_attribute(Attribute::Dim)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}
