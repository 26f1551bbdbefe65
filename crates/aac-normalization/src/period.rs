//! Calendar fields derived from the period token and month columns.
//!
//! Periods look like `2019.03`: the year, a dot, and the quarter-ending month.
//! Month tokens in the month columns are three-letter abbreviations (`Mar`,
//! `Jun`, `Sep`, `Dec`), with `Q1`..`Q4` accepted as well.

use aac_model::{DEFAULT_MONTH, QUARTER_END_MONTHS};

use crate::numeric::parse_leading_int;

/// Year used when the period token carries no usable year.
pub const FALLBACK_YEAR: i32 = 0;

/// Derive the year from a period token.
///
/// Tries a whole-token integer parse first, then the integer-like prefix of
/// the part before the first `.`. Falls back to [`FALLBACK_YEAR`].
pub fn derive_year(period: &str) -> i32 {
    let trimmed = period.trim();
    if let Ok(year) = trimmed.parse::<i32>() {
        return year;
    }
    trimmed
        .split('.')
        .next()
        .and_then(parse_leading_int)
        .unwrap_or(FALLBACK_YEAR)
}

/// Map a month token to its quarter-ending month number.
pub fn month_from_token(token: &str) -> Option<u32> {
    let trimmed = token.trim();
    let prefix: String = trimmed.chars().take(3).collect::<String>().to_ascii_lowercase();
    match prefix.as_str() {
        "mar" | "q1" => Some(3),
        "jun" | "q2" => Some(6),
        "sep" | "q3" => Some(9),
        "dec" | "q4" => Some(12),
        _ => None,
    }
}

/// Read the month from the fractional part of a period token (`2019.06` -> 6).
///
/// Only quarter-ending months are accepted.
pub fn month_from_period(period: &str) -> Option<u32> {
    let (_, fraction) = period.trim().split_once('.')?;
    let month = fraction.trim().parse::<u32>().ok()?;
    QUARTER_END_MONTHS.contains(&month).then_some(month)
}

/// Resolve the month for a record.
///
/// An explicit month token wins; without one, the period's fractional part is
/// used; otherwise the month defaults to December.
pub fn derive_month(token: Option<&str>, period: &str) -> u32 {
    match token {
        Some(token) => month_from_token(token).unwrap_or(DEFAULT_MONTH),
        None => month_from_period(period).unwrap_or(DEFAULT_MONTH),
    }
}
