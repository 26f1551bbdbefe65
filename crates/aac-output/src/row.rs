//! Flat export rows.

use std::collections::BTreeMap;

use crate::rounding::{FieldKind, format_number, round_for};

static MISSING: ExportValue = ExportValue::Missing;

/// One exported cell.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportValue {
    Text(String),
    Number(f64),
    Missing,
}

impl ExportValue {
    pub fn text(value: impl Into<String>) -> Self {
        ExportValue::Text(value.into())
    }

    /// A number, or [`ExportValue::Missing`] when absent.
    pub fn number(value: Option<f64>) -> Self {
        value.map_or(ExportValue::Missing, ExportValue::Number)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ExportValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// CSV cell text; missing values are empty.
    pub fn to_cell(&self) -> String {
        match self {
            ExportValue::Text(s) => s.clone(),
            ExportValue::Number(v) => format_number(*v),
            ExportValue::Missing => String::new(),
        }
    }

    fn rounded(self, kind: FieldKind) -> Self {
        match self {
            ExportValue::Number(v) => ExportValue::Number(round_for(v, kind)),
            other => other,
        }
    }
}

impl From<&str> for ExportValue {
    fn from(value: &str) -> Self {
        ExportValue::text(value)
    }
}

impl From<String> for ExportValue {
    fn from(value: String) -> Self {
        ExportValue::Text(value)
    }
}

impl From<f64> for ExportValue {
    fn from(value: f64) -> Self {
        ExportValue::Number(value)
    }
}

impl From<Option<f64>> for ExportValue {
    fn from(value: Option<f64>) -> Self {
        ExportValue::number(value)
    }
}

impl From<i32> for ExportValue {
    fn from(value: i32) -> Self {
        ExportValue::Number(f64::from(value))
    }
}

impl From<u32> for ExportValue {
    fn from(value: u32) -> Self {
        ExportValue::Number(f64::from(value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportColumn {
    pub name: String,
    pub kind: FieldKind,
}

impl ExportColumn {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// One row, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportRow {
    cells: BTreeMap<String, ExportValue>,
}

impl ExportRow {
    pub fn get(&self, column: &str) -> Option<&ExportValue> {
        self.cells.get(column)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Ordered rows under an ordered column list.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    /// Suggested file stem, e.g. `composition-litres-of-beverage`.
    pub name: String,
    columns: Vec<ExportColumn>,
    rows: Vec<ExportRow>,
}

impl ExportTable {
    pub fn new(name: impl Into<String>, columns: Vec<ExportColumn>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row given in column order. Numbers are rounded for their
    /// column's kind; values past the last column are ignored and missing
    /// trailing values become [`ExportValue::Missing`].
    pub fn push(&mut self, values: Vec<ExportValue>) {
        let mut values = values.into_iter();
        let cells = self
            .columns
            .iter()
            .map(|column| {
                let value = values.next().unwrap_or(ExportValue::Missing);
                (column.name.clone(), value.rounded(column.kind))
            })
            .collect();
        self.rows.push(ExportRow { cells });
    }

    pub fn columns(&self) -> &[ExportColumn] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn rows(&self) -> &[ExportRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell values of one row in column order.
    pub fn ordered_values<'a>(
        &'a self,
        row: &'a ExportRow,
    ) -> impl Iterator<Item = &'a ExportValue> + 'a {
        self.columns
            .iter()
            .map(move |column| row.get(&column.name).unwrap_or(&MISSING))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ExportTable {
        ExportTable::new(
            "test",
            vec![
                ExportColumn::new("series", FieldKind::Text),
                ExportColumn::new("value", FieldKind::Volume),
                ExportColumn::new("share", FieldKind::Share),
            ],
        )
    }

    #[test]
    fn test_push_rounds_by_column_kind() {
        let mut table = table();
        table.push(vec!["beer".into(), 12.345_67.into(), 0.333_333_3.into()]);
        let row = &table.rows()[0];
        assert_eq!(row.get("value"), Some(&ExportValue::Number(12.346)));
        assert_eq!(row.get("share"), Some(&ExportValue::Number(0.3333)));
    }

    #[test]
    fn test_short_row_is_padded_with_missing() {
        let mut table = table();
        table.push(vec!["wine".into()]);
        let values: Vec<&ExportValue> = table.ordered_values(&table.rows()[0]).collect();
        assert_eq!(values[1], &ExportValue::Missing);
        assert_eq!(values[2], &ExportValue::Missing);
    }

    #[test]
    fn test_cells() {
        assert_eq!(ExportValue::number(None).to_cell(), "");
        assert_eq!(ExportValue::Number(40.0).to_cell(), "40");
        assert_eq!(ExportValue::text("2010-2019").to_cell(), "2010-2019");
    }
}
