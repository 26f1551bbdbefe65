//! Source column names and their tolerated aliases.
//!
//! Published extracts of the dataset have renamed a few columns over time.
//! Each logical column is an ordered list of candidate headers; the first
//! candidate holding a non-blank value wins.

use aac_model::RawRow;

/// A logical column and the headers it may appear under, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnAliases {
    pub name: &'static str,
    pub candidates: &'static [&'static str],
}

impl ColumnAliases {
    pub const fn new(name: &'static str, candidates: &'static [&'static str]) -> Self {
        Self { name, candidates }
    }

    /// First non-blank value among the candidates.
    pub fn resolve<'a>(&self, row: &'a RawRow) -> Option<&'a str> {
        row.first_present(self.candidates)
    }

    /// True if any candidate header is among `headers`.
    pub fn matches_any<S: AsRef<str>>(&self, headers: &[S]) -> bool {
        headers
            .iter()
            .any(|header| self.candidates.contains(&header.as_ref()))
    }
}

pub const PERIOD: ColumnAliases = ColumnAliases::new("Period", &["Period"]);
pub const GROUP: ColumnAliases = ColumnAliases::new("Group", &["Group"]);
pub const SERIES: ColumnAliases = ColumnAliases::new("Series_title_1", &["Series_title_1"]);
pub const VALUE: ColumnAliases = ColumnAliases::new("Data_value", &["Data_value"]);
pub const UNITS: ColumnAliases = ColumnAliases::new("UNITS", &["UNITS", "Units"]);
pub const MONTH: ColumnAliases = ColumnAliases::new(
    "Month",
    &["Month", "MONTH", "Quarter", "Series_title_2", "Period_month"],
);

/// Columns a source table must carry to be loadable.
pub const REQUIRED_COLUMNS: [ColumnAliases; 5] = [PERIOD, GROUP, SERIES, VALUE, UNITS];

/// Required logical columns that none of `headers` satisfies.
pub fn missing_required_columns<S: AsRef<str>>(headers: &[S]) -> Vec<&'static str> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|column| !column.matches_any(headers))
        .map(|column| column.name)
        .collect()
}
