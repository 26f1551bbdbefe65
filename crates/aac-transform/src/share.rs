//! Totals and shares.
//!
//! A bucket total is the sum of its present members only. When that total is
//! zero every member's share is an explicit `0.0`; otherwise an absent member
//! keeps an absent share.

/// Sum of the present values; `0.0` when none are present.
pub fn present_sum<I>(values: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    values.into_iter().flatten().sum()
}

/// Fold a value into an accumulator without turning absence into zero.
pub fn add_present(acc: Option<f64>, value: Option<f64>) -> Option<f64> {
    match (acc, value) {
        (Some(a), Some(b)) => Some(a + b),
        (a, b) => a.or(b),
    }
}

/// One member's share of a bucket total.
pub fn share_of(value: Option<f64>, total: f64) -> Option<f64> {
    if total == 0.0 {
        Some(0.0)
    } else {
        value.map(|v| v / total)
    }
}

/// Shares of every member against their common total.
pub fn shares(values: &[Option<f64>], total: f64) -> Vec<Option<f64>> {
    values.iter().map(|&value| share_of(value, total)).collect()
}
