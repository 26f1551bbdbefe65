//! Record normalization for alcohol availability tables.
//!
//! Turns string-keyed [`RawRow`](aac_model::RawRow)s into typed
//! [`NormalizedRecord`](aac_model::NormalizedRecord)s:
//!
//! - **numeric**: `..`/blank/unparseable cells become "not reported"
//! - **period**: year and quarter-ending month from the period and month columns
//! - **slug**: stable keys for group and series labels
//! - **columns**: column names and their tolerated aliases
//! - **record**: per-row normalization, table normalization and model building
//!
//! Every function here is pure; nothing fails. Malformed input degrades to
//! documented defaults instead.

pub mod columns;
pub mod numeric;
pub mod period;
pub mod record;
pub mod slug;

pub use columns::{ColumnAliases, REQUIRED_COLUMNS, missing_required_columns};
pub use numeric::{NOT_REPORTED, is_not_reported, parse_value};
pub use period::{FALLBACK_YEAR, derive_month, derive_year, month_from_token};
pub use record::{NormalizationStats, build_model, normalize_row, normalize_rows};
pub use slug::slugify;
