//! Property tests for the aggregation policies.

use aac_transform::{
    NamedSeries, detect_crossovers, moving_average, present_sum, shares, smooth,
};
use proptest::prelude::*;

fn values() -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(prop::option::of(-1.0e6..1.0e6_f64), 0..32)
}

proptest! {
    #[test]
    fn smoothing_with_window_one_is_noop(series in values(), window in 0_usize..=1) {
        prop_assert_eq!(moving_average(&series, window), series);
    }

    #[test]
    fn smoothing_keeps_length_and_presence(series in values(), window in 2_usize..8) {
        let smoothed = moving_average(&series, window);
        prop_assert_eq!(smoothed.len(), series.len());
        for (i, value) in smoothed.iter().enumerate() {
            let start = (i + 1).saturating_sub(window);
            let any_present = series[start..=i].iter().any(Option::is_some);
            prop_assert_eq!(value.is_some(), any_present);
        }
    }

    #[test]
    fn shares_sum_to_one_for_positive_members(members in prop::collection::vec(0.001..1.0e6_f64, 1..12)) {
        let values: Vec<Option<f64>> = members.iter().copied().map(Some).collect();
        let total = present_sum(values.iter().copied());
        let sum: f64 = shares(&values, total).into_iter().flatten().sum();
        prop_assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn zero_total_gives_zero_shares(len in 1_usize..12) {
        let values = vec![Some(0.0); len];
        prop_assert!(shares(&values, 0.0).iter().all(|s| *s == Some(0.0)));
    }

    #[test]
    fn crossovers_lie_within_sample_span(
        a in prop::collection::vec(-100.0..100.0_f64, 2..16),
        b in prop::collection::vec(-100.0..100.0_f64, 2..16),
    ) {
        let len = a.len().min(b.len());
        let a: Vec<Option<f64>> = a[..len].iter().copied().map(Some).collect();
        let b: Vec<Option<f64>> = b[..len].iter().copied().map(Some).collect();
        let times: Vec<f64> = (0..len).map(|i| i as f64).collect();
        let found = detect_crossovers(&times, &[NamedSeries::new("a", &a), NamedSeries::new("b", &b)]).unwrap();
        prop_assert!(found.len() <= len);
        for crossover in found {
            prop_assert!(crossover.time >= 0.0 && crossover.time <= (len - 1) as f64);
        }
    }
}

#[test]
fn default_smoothing_window_is_four() {
    let values = [Some(4.0), Some(8.0), Some(12.0), Some(16.0), Some(20.0)];
    assert_eq!(smooth(&values)[4], Some(14.0));
}
