//! Property-Based Tests for the Scoring Pipeline
//!
//! These tests verify invariants of the aggregation policy and the
//! placement detector using proptest for input generation and shrinking.
//!
//! Run with: cargo test --test scoring_props

use fingercap::config::FingerCapConfig;
use fingercap::detection::PlacementDetector;
use fingercap::quality::ScoreAggregator;
use fingercap::testing::solid_luma_frame;
use proptest::prelude::*;

fn aggregator() -> ScoreAggregator {
    ScoreAggregator::new(FingerCapConfig::default().scoring)
}

proptest! {
    /// INVARIANT: The weighted score always lands in 0..=100
    #[test]
    fn score_is_bounded(
        focus in 0.0f64..5000.0,
        illum in 0.0f64..255.0,
        coverage in 0.0f64..100.0,
        position_ok in any::<bool>(),
    ) {
        let result = aggregator().aggregate(focus, illum, coverage, position_ok);
        prop_assert!(result.overall_score <= 100);
        prop_assert!(result.focus_part >= 0.0 && result.focus_part <= 35.0);
        prop_assert!(result.coverage_part >= 0.0 && result.coverage_part <= 30.0);
    }

    /// INVARIANT: Aggregation is a pure function of its inputs
    #[test]
    fn aggregation_is_idempotent(
        focus in 0.0f64..200.0,
        illum in 0.0f64..255.0,
        coverage in 0.0f64..100.0,
        position_ok in any::<bool>(),
    ) {
        let a = aggregator().aggregate(focus, illum, coverage, position_ok);
        let b = aggregator().aggregate(focus, illum, coverage, position_ok);
        prop_assert_eq!(a, b);
    }

    /// INVARIANT: Focus never influences the pass/fail gate
    #[test]
    fn focus_never_gates(
        focus_a in 0.0f64..500.0,
        focus_b in 0.0f64..500.0,
        illum in 0.0f64..255.0,
        coverage in 0.0f64..100.0,
        position_ok in any::<bool>(),
    ) {
        let a = aggregator().aggregate(focus_a, illum, coverage, position_ok);
        let b = aggregator().aggregate(focus_b, illum, coverage, position_ok);
        prop_assert_eq!(a.overall_passed, b.overall_passed);
        prop_assert_eq!(a.illum_passed, b.illum_passed);
        prop_assert_eq!(a.coverage_passed, b.coverage_passed);
    }

    /// INVARIANT: A green position indicator always opens the coverage gate
    #[test]
    fn position_forces_coverage_pass(
        focus in 0.0f64..200.0,
        illum in 0.0f64..255.0,
        coverage in 0.0f64..100.0,
    ) {
        let result = aggregator().aggregate(focus, illum, coverage, true);
        prop_assert!(result.coverage_passed);
        // The corrected value never sits below the override floor
        prop_assert!(result.corrected_coverage >= 40.0 || result.corrected_coverage == coverage);
    }

    /// INVARIANT: Without the override, more coverage never lowers the score
    #[test]
    fn coverage_is_monotone_without_override(
        focus in 0.0f64..200.0,
        illum in 0.0f64..255.0,
        low in 0.0f64..100.0,
        high in 0.0f64..100.0,
    ) {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let a = aggregator().aggregate(focus, illum, low, false);
        let b = aggregator().aggregate(focus, illum, high, false);
        prop_assert!(b.overall_score >= a.overall_score);
    }

    /// INVARIANT: Uniform frames never divide by zero in the detector
    #[test]
    fn detector_handles_any_uniform_frame(
        value in any::<u8>(),
        width in 1u32..64,
        height in 1u32..64,
    ) {
        let detector = PlacementDetector::new(FingerCapConfig::default().detection);
        let result = detector.detect(&solid_luma_frame(width, height, value));
        prop_assert!(result.is_ok());
    }

    /// INVARIANT: Position follows the luminance band on uniform frames
    #[test]
    fn uniform_position_matches_band(value in any::<u8>()) {
        let detector = PlacementDetector::new(FingerCapConfig::default().detection);
        let result = detector.detect(&solid_luma_frame(320, 240, value)).unwrap();
        let expected = value > 70 && value < 210;
        prop_assert_eq!(result.position_ok, expected);
    }
}
