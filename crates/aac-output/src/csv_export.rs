//! CSV encoding of export tables, and re-reading them for verification.

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use tracing::info;

use crate::error::{OutputError, Result};
use crate::row::{ExportColumn, ExportTable, ExportValue};

/// Ensure a parent directory exists for a file path.
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

fn write_table<W: std::io::Write>(table: &ExportTable, writer: W) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    writer.write_record(table.column_names())?;
    for row in table.rows() {
        let cells: Vec<String> = table.ordered_values(row).map(ExportValue::to_cell).collect();
        writer.write_record(&cells)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Encode a table as CSV text: header row, then one line per row.
pub fn to_csv_string(table: &ExportTable) -> Result<String> {
    let mut buffer = Vec::new();
    write_table(table, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Write a table to `path`, creating parent directories.
pub fn write_csv(table: &ExportTable, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = fs::File::create(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_table(table, file)?;
    info!(path = %path.display(), rows = table.len(), "export written");
    Ok(())
}

/// Parse exported CSV text back into a table with the given columns.
///
/// Empty cells become [`ExportValue::Missing`]; numeric columns must hold
/// numbers.
pub fn parse_csv_table(name: &str, text: &str, columns: &[ExportColumn]) -> Result<ExportTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();
    let positions = columns
        .iter()
        .map(|column| {
            headers
                .iter()
                .position(|h| h.trim_matches('\u{feff}') == column.name)
                .ok_or_else(|| OutputError::MissingColumn {
                    column: column.name.clone(),
                })
        })
        .collect::<Result<Vec<usize>>>()?;

    let mut table = ExportTable::new(name, columns.to_vec());
    for record in reader.records() {
        let record = record?;
        let values = columns
            .iter()
            .zip(&positions)
            .map(|(column, &idx)| parse_cell(column, record.get(idx).unwrap_or_default()))
            .collect::<Result<Vec<_>>>()?;
        table.push(values);
    }
    Ok(table)
}

/// Read an exported CSV file back into a table with the given columns.
pub fn read_csv_table(path: &Path, columns: &[ExportColumn]) -> Result<ExportTable> {
    let text = fs::read_to_string(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    parse_csv_table(&name, &text, columns)
}

fn parse_cell(column: &ExportColumn, cell: &str) -> Result<ExportValue> {
    if cell.is_empty() {
        return Ok(ExportValue::Missing);
    }
    if !column.kind.is_numeric() {
        return Ok(ExportValue::text(cell));
    }
    cell.parse::<f64>()
        .map(ExportValue::Number)
        .map_err(|_| OutputError::InvalidNumber {
            column: column.name.clone(),
            value: cell.to_string(),
        })
}
