//! Pairwise crossover detection between time-aligned series.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TransformError};

/// How a crossover was located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossoverKind {
    /// The two series are equal at a sample.
    Exact,
    /// The difference changes sign between two samples.
    Interpolated,
}

/// A point where two series' relative ordering flips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crossover {
    pub first: String,
    pub second: String,
    pub time: f64,
    /// Value of `first` (and so of `second`) at `time`.
    pub value: f64,
    pub kind: CrossoverKind,
}

/// A named value sequence on the shared time axis.
#[derive(Debug, Clone, Copy)]
pub struct NamedSeries<'a> {
    pub key: &'a str,
    pub values: &'a [Option<f64>],
}

impl<'a> NamedSeries<'a> {
    pub fn new(key: &'a str, values: &'a [Option<f64>]) -> Self {
        Self { key, values }
    }
}

/// Find every crossover between every unordered pair of `series`.
///
/// For consecutive samples `i-1, i` with all four values present and
/// `d = first - second`:
///
/// - `d(i-1) == 0` is an exact crossover at `times[i-1]`;
/// - `d(i-1) * d(i) < 0` is interpolated with
///   `ratio = |d(i-1)| / (|d(i-1)| + |d(i)|)`;
/// - `d(i) == 0` is an exact crossover at `times[i]` when no evaluable pair
///   starts at `i` (last sample, or a value at `i+1` is absent).
///
/// Zero is not a sign, so a touch at a sample is reported once. Results come
/// back in pair order, then sample order.
///
/// # Errors
///
/// [`TransformError::LengthMismatch`] when a sequence is not as long as `times`.
pub fn detect_crossovers(times: &[f64], series: &[NamedSeries<'_>]) -> Result<Vec<Crossover>> {
    if let Some(bad) = series.iter().find(|s| s.values.len() != times.len()) {
        return Err(TransformError::LengthMismatch {
            series: bad.key.to_string(),
            expected: times.len(),
            found: bad.values.len(),
        });
    }

    let mut found = Vec::new();
    for (idx, first) in series.iter().enumerate() {
        for second in &series[idx + 1..] {
            found.extend(pair_crossovers(times, first, second));
        }
    }
    Ok(found)
}

fn pair_crossovers(
    times: &[f64],
    first: &NamedSeries<'_>,
    second: &NamedSeries<'_>,
) -> Vec<Crossover> {
    let sample = |i: usize| -> Option<(f64, f64)> {
        Some((first.values.get(i).copied()??, second.values.get(i).copied()??))
    };
    let event = |time: f64, value: f64, kind: CrossoverKind| Crossover {
        first: first.key.to_string(),
        second: second.key.to_string(),
        time,
        value,
        kind,
    };

    let mut found = Vec::new();
    for i in 1..times.len() {
        let (Some((a0, b0)), Some((a1, b1))) = (sample(i - 1), sample(i)) else {
            continue;
        };
        let d0 = a0 - b0;
        let d1 = a1 - b1;
        let (t0, t1) = (times[i - 1], times[i]);

        if d0 == 0.0 {
            found.push(event(t0, a0, CrossoverKind::Exact));
        } else if d0 * d1 < 0.0 {
            let ratio = d0.abs() / (d0.abs() + d1.abs());
            found.push(event(
                t0 + ratio * (t1 - t0),
                a0 + ratio * (a1 - a0),
                CrossoverKind::Interpolated,
            ));
        }

        // No pair starts at `i`, so its equality is reported here.
        if d1 == 0.0 && sample(i + 1).is_none() {
            found.push(event(t1, a1, CrossoverKind::Exact));
        }
    }
    found
}

/// Order crossovers by time, then by pair.
pub fn sort_crossovers(crossovers: &mut [Crossover]) {
    crossovers.sort_by(|a, b| {
        a.time
            .total_cmp(&b.time)
            .then_with(|| a.first.cmp(&b.first))
            .then_with(|| a.second.cmp(&b.second))
    });
}
