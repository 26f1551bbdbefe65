//! Rounding by semantic field kind.
//!
//! Every numeric export value goes through [`round_for`] exactly once when the
//! row is built. Rounding an already rounded value returns it unchanged, so
//! exporting the same frame twice gives byte-identical output.

use std::fmt;

/// What a column holds, which fixes how it is rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    /// Raw volumes, 3 decimal digits.
    Volume,
    /// Shares, 4 decimal digits.
    Share,
    /// Unit ratios, 4 decimal digits.
    Ratio,
    /// Counts, whole numbers.
    Count,
    /// Years, whole numbers.
    Year,
}

impl FieldKind {
    /// Decimal digits kept, `None` for text.
    pub fn digits(self) -> Option<i32> {
        match self {
            FieldKind::Text => None,
            FieldKind::Volume => Some(3),
            FieldKind::Share | FieldKind::Ratio => Some(4),
            FieldKind::Count | FieldKind::Year => Some(0),
        }
    }

    pub fn is_numeric(self) -> bool {
        self.digits().is_some()
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Text => "text",
            FieldKind::Volume => "volume",
            FieldKind::Share => "share",
            FieldKind::Ratio => "ratio",
            FieldKind::Count => "count",
            FieldKind::Year => "year",
        };
        f.write_str(name)
    }
}

/// Round half away from zero to `digits` decimal places.
pub fn round_to(value: f64, digits: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10_f64.powi(digits);
    let rounded = (value * factor).round() / factor;
    // Avoid exporting "-0".
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Round a value for a column of the given kind.
pub fn round_for(value: f64, kind: FieldKind) -> f64 {
    match kind.digits() {
        Some(digits) => round_to(value, digits),
        None => value,
    }
}

/// Shortest text that parses back to the same number, trailing zeros trimmed.
pub fn format_number(value: f64) -> String {
    let s = format!("{value}");
    // Only trim trailing zeros if there's a decimal point
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() || trimmed == "-" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        s
    }
}
