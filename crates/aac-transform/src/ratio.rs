//! Unit-basis ratios.
//!
//! Unlike shares, a ratio never substitutes zero: it is absent whenever
//! either operand is absent or the denominator is exactly zero.

use serde::{Deserialize, Serialize};

pub fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0.0 => Some(n / d),
        _ => None,
    }
}

/// Count, mean and range of the present ratios in a sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RatioSummary {
    pub count: usize,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl RatioSummary {
    pub fn from_ratios<I>(ratios: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let mut summary = Self::default();
        let mut sum = 0.0;
        for value in ratios.into_iter().flatten() {
            summary.count += 1;
            sum += value;
            summary.min = Some(summary.min.map_or(value, |m: f64| m.min(value)));
            summary.max = Some(summary.max.map_or(value, |m: f64| m.max(value)));
        }
        if summary.count > 0 {
            summary.mean = Some(sum / summary.count as f64);
        }
        summary
    }
}
