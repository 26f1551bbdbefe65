//! Trailing moving average.

use aac_model::DEFAULT_SMOOTHING_WINDOW;

/// Smooth with the default window of four periods.
pub fn smooth(values: &[Option<f64>]) -> Vec<Option<f64>> {
    moving_average(values, DEFAULT_SMOOTHING_WINDOW)
}

/// Trailing moving average over `window` points.
///
/// Point `i` averages the present values among the last `min(window, i + 1)`
/// points ending at `i`. When none of them is present the original absent
/// value is returned, never zero. A window of 0 or 1 returns the input as is.
pub fn moving_average(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window <= 1 {
        return values.to_vec();
    }
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let (sum, count) = values[start..=i]
                .iter()
                .flatten()
                .fold((0.0, 0_u32), |(sum, count), v| (sum + v, count + 1));
            if count == 0 {
                values[i]
            } else {
                Some(sum / f64::from(count))
            }
        })
        .collect()
}
