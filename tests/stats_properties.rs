//! Property-based tests for the statistics layer
//!
//! These tests verify invariants that should hold for all inputs:
//! - Summaries are bounded by the data and never have negative spread
//! - Curves have a fixed size, ascending positions and non-negative density
//! - The plotted range always keeps the target in view
//! - Fallback targets never sit below their warning threshold

use proptest::prelude::*;
use scorecast::recommend::fallback_recommendation;
use scorecast::stats::{sample, summarize, Stability, StatisticalSummary};
use scorecast::{classify, Recommendation, Status};

fn scores() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1000.0f64..1000.0, 1..40)
}

proptest! {
    #[test]
    fn prop_summary_is_bounded_by_data(values in scores()) {
        let summary = summarize(&values);
        prop_assert!(summary.std_dev >= 0.0);
        prop_assert!(summary.min <= summary.mean + 1e-9);
        prop_assert!(summary.mean <= summary.max + 1e-9);
        prop_assert!(summary.std_dev <= (summary.max - summary.min) + 1e-9);
    }

    #[test]
    fn prop_summary_ignores_order(mut values in scores()) {
        let before = summarize(&values);
        values.reverse();
        let after = summarize(&values);
        prop_assert_eq!(before.min, after.min);
        prop_assert_eq!(before.max, after.max);
        prop_assert!((before.mean - after.mean).abs() < 1e-9);
    }

    #[test]
    fn prop_curve_shape(mean in -500.0f64..500.0, std_dev in 0.5f64..100.0) {
        let curve = sample(mean, std_dev, None);
        prop_assert_eq!(curve.len(), 101);
        prop_assert!(curve.windows(2).all(|w| w[0].x <= w[1].x));
        prop_assert!(curve.iter().all(|p| p.density >= 0.0 && p.density.is_finite()));

        // peak lands on the sample closest to the mean
        let peak = curve
            .iter()
            .max_by(|a, b| a.density.total_cmp(&b.density))
            .unwrap();
        prop_assert!((peak.x - mean).abs() <= 7.0 * std_dev / 100.0 + 0.01);
    }

    #[test]
    fn prop_curve_keeps_target_in_view(
        mean in -500.0f64..500.0,
        std_dev in 0.5f64..50.0,
        target in -2000.0f64..2000.0,
    ) {
        let curve = sample(mean, std_dev, Some(target));
        prop_assert_eq!(curve.len(), 101);
        let first = curve.first().unwrap().x;
        let last = curve.last().unwrap().x;
        prop_assert!(first <= target - std_dev + 0.01);
        prop_assert!(last >= target + std_dev - 0.01);
        prop_assert!(first <= mean - 3.5 * std_dev + 0.01);
        prop_assert!(last >= mean + 3.5 * std_dev - 0.01);
    }

    #[test]
    fn prop_zero_spread_is_a_spike(
        mean in -500.0f64..500.0,
        target in proptest::option::of(-500.0f64..500.0),
    ) {
        let curve = sample(mean, 0.0, target);
        prop_assert_eq!(curve.len(), 3);
        prop_assert_eq!(curve[1].density, 1.0);
    }

    #[test]
    fn prop_fallback_target_not_below_warning(mean in -500.0f64..500.0, std_dev in 0.0f64..100.0) {
        let summary = StatisticalSummary { mean, std_dev, min: mean, max: mean };
        let rec = fallback_recommendation(&summary);
        prop_assert!(rec.recommended_score() >= rec.warning_score());
        prop_assert!(rec.is_estimated());
        prop_assert_eq!(rec.advice().len(), 3);
    }

    #[test]
    fn prop_status_matches_thresholds(
        last in -100.0f64..200.0,
        warning in -100.0f64..200.0,
        recommended in -100.0f64..200.0,
    ) {
        let rec = Recommendation::new(recommended, warning, "Moderate", "", vec!["a".into()]);
        let expected = if last < warning {
            Status::Abnormal
        } else if last >= recommended {
            Status::Achieved
        } else {
            Status::InProgress
        };
        prop_assert_eq!(classify(last, Some(&rec)), expected);
    }

    #[test]
    fn prop_stability_is_monotonic(a in 0.01f64..50.0, b in 0.01f64..50.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(Stability::from_std_dev(low) as u8 <= Stability::from_std_dev(high) as u8);
    }
}

#[test]
fn test_empty_summary_is_all_zero() {
    assert_eq!(summarize(&[]), StatisticalSummary::default());
    assert_eq!(Stability::from_std_dev(0.0), Stability::NotApplicable);
}
