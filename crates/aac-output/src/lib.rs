//! Export projection for analytical view frames.
//!
//! Flattens any view's derived structure into an [`ExportTable`] of
//! [`ExportValue`] cells, rounded by semantic field kind, and writes it as
//! CSV for download.
//!
//! # Rounding
//!
//! | Kind | Digits |
//! |------|--------|
//! | Volume | 3 |
//! | Share, Ratio | 4 |
//! | Count, Year | 0 |
//!
//! Rounding is idempotent, so exporting unchanged data twice is
//! byte-identical and re-reading an export reproduces the same numbers.

mod csv_export;
mod error;
mod project;
mod rounding;
mod row;

pub use csv_export::{parse_csv_table, read_csv_table, to_csv_string, write_csv};
pub use error::{OutputError, Result};
pub use project::{
    ExportProjection, composition_columns, crossover_columns, seasonal_columns, trend_columns,
    unit_check_columns,
};
pub use rounding::{FieldKind, format_number, round_for, round_to};
pub use row::{ExportColumn, ExportRow, ExportTable, ExportValue};
