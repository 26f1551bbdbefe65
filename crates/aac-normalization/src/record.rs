//! Raw row to normalized record conversion.

use aac_model::{DataModel, NormalizedRecord, RawRow, record_date};
use tracing::{debug, warn};

use crate::columns::{GROUP, MONTH, PERIOD, SERIES, UNITS, VALUE};
use crate::numeric::parse_value;
use crate::period::{FALLBACK_YEAR, derive_month, derive_year};
use crate::slug::slugify;

/// Counters collected while normalizing a full table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizationStats {
    /// Rows offered to the normalizer.
    pub rows: usize,
    /// Records produced.
    pub records: usize,
    /// Rows dropped for an empty series label.
    pub dropped: usize,
    /// Records whose value was not reported.
    pub not_reported: usize,
    /// Records that fell back to year 0.
    pub year_fallbacks: usize,
}

/// Normalize one raw row.
///
/// Returns `None` when the series label is empty after trimming; such rows are
/// header or footnote artifacts of the published table. Everything else
/// produces a record: bad numbers become `None`, a bad period becomes year 0,
/// a missing month becomes December.
pub fn normalize_row(row: &RawRow) -> Option<NormalizedRecord> {
    let series_label = SERIES.resolve(row).map(str::trim).unwrap_or_default();
    if series_label.is_empty() {
        return None;
    }
    let group_label = GROUP.resolve(row).map(str::trim).unwrap_or_default();
    let period = PERIOD.resolve(row).unwrap_or_default();

    let month = derive_month(MONTH.resolve(row), period);
    let derived_year = derive_year(period);
    let (year, date) = match record_date(derived_year, month) {
        Ok(date) => (derived_year, date),
        // Month is always a quarter-end month here, so year 0 always resolves.
        Err(_) => (FALLBACK_YEAR, record_date(FALLBACK_YEAR, month).ok()?),
    };

    Some(NormalizedRecord {
        period: period.to_string(),
        date,
        year,
        month,
        value: parse_value(VALUE.resolve(row)),
        units: UNITS.resolve(row).map(str::trim).unwrap_or_default().to_string(),
        group_key: slugify(group_label),
        group_label: group_label.to_string(),
        series_key: slugify(series_label),
        series_label: series_label.to_string(),
    })
}

/// Normalize a full table and sort the result by date.
///
/// The sort is stable, so records sharing a date keep their file order.
pub fn normalize_rows(rows: &[RawRow]) -> (Vec<NormalizedRecord>, NormalizationStats) {
    let mut records: Vec<NormalizedRecord> = rows.iter().filter_map(normalize_row).collect();
    records.sort_by_key(|record| record.date);

    let stats = NormalizationStats {
        rows: rows.len(),
        records: records.len(),
        dropped: rows.len() - records.len(),
        not_reported: records.iter().filter(|r| !r.is_reported()).count(),
        year_fallbacks: records.iter().filter(|r| r.year == FALLBACK_YEAR).count(),
    };
    debug!(
        rows = stats.rows,
        records = stats.records,
        dropped = stats.dropped,
        not_reported = stats.not_reported,
        "normalized rows"
    );
    if stats.year_fallbacks > 0 {
        warn!(
            count = stats.year_fallbacks,
            "records with an unreadable period were assigned year 0"
        );
    }
    (records, stats)
}

/// Normalize, sort and index a table in one step.
pub fn build_model(rows: &[RawRow]) -> DataModel {
    let (records, _) = normalize_rows(rows);
    DataModel::build(records)
}
