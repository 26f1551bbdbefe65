//! Raw source rows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One line of the source table: column name to optional cell text.
///
/// A `None` cell means the column exists but the reader produced no value
/// (an empty or null cell). Absent columns are simply not in the map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    cells: BTreeMap<String, Option<String>>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a present cell.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.cells.insert(column.into(), Some(value.into()));
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: Option<String>) {
        self.cells.insert(column.into(), value);
    }

    /// Returns the cell text for `column`, if the column exists and has a value.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).and_then(|value| value.as_deref())
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    /// Returns the first candidate column holding a non-blank value.
    ///
    /// Candidates are tried in order, so callers list the preferred column first.
    pub fn first_present(&self, candidates: &[&str]) -> Option<&str> {
        candidates
            .iter()
            .filter_map(|column| self.get(column))
            .find(|value| !value.trim().is_empty())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<(String, Option<String>)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (String, Option<String>)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_present_skips_missing_and_blank_cells() {
        let mut row = RawRow::new().with("Quarter", "Jun");
        row.insert("Month", None);
        row.insert("MONTH", Some("   ".to_string()));

        assert_eq!(row.first_present(&["Month", "MONTH", "Quarter"]), Some("Jun"));
        assert_eq!(row.first_present(&["Month", "MONTH"]), None);
    }

    #[test]
    fn get_distinguishes_missing_column_from_null_cell() {
        let mut row = RawRow::new();
        row.insert("Data_value", None);

        assert!(row.contains_column("Data_value"));
        assert_eq!(row.get("Data_value"), None);
        assert!(!row.contains_column("UNITS"));
    }
}
