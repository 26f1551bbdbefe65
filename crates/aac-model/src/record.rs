//! The normalized record, the canonical unit every view works from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Quarter-ending months used by the source data.
pub const QUARTER_END_MONTHS: [u32; 4] = [3, 6, 9, 12];

/// Month assumed when the source gives no usable month token.
pub const DEFAULT_MONTH: u32 = 12;

/// A typed, validated source row.
///
/// `value` is `None` when the figure was not reported. That is distinct from
/// a reported zero and must survive every aggregation unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Period token exactly as it appeared in the source.
    pub period: String,
    /// First day of `month` in `year`.
    pub date: NaiveDate,
    pub year: i32,
    /// One of [`QUARTER_END_MONTHS`].
    pub month: u32,
    pub value: Option<f64>,
    pub units: String,
    pub group_key: String,
    pub group_label: String,
    pub series_key: String,
    pub series_label: String,
}

impl NormalizedRecord {
    pub fn is_reported(&self) -> bool {
        self.value.is_some()
    }
}

/// Builds the calendar date a record is plotted at.
///
/// # Errors
///
/// Returns [`ModelError::InvalidDate`] when the year is outside the range
/// `chrono` can represent or the month is not a calendar month.
pub fn record_date(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(ModelError::InvalidDate { year, month })
}
