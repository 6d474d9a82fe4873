use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use retlabel::labeling::label;
use retlabel::{Diagnostic, LabelKind, LabelingConfig, PriceSeries, Sign};

fn daily(prices: &[f64]) -> PriceSeries {
    let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    PriceSeries::from_pairs(
        prices
            .iter()
            .enumerate()
            .map(|(i, &p)| (start + Duration::days(i as i64), p)),
    )
}

fn random_walk(seed: u64, len: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut price = 100.0;
    (0..len)
        .map(|_| {
            price *= 1.0 + rng.gen_range(-0.03..0.03);
            price
        })
        .collect()
}

#[test]
fn test_simple_return_matches_ratio() {
    for seed in 0..5 {
        let prices = random_walk(seed, 60);
        for lookback in [1, 2, 5, 20] {
            let config = LabelingConfig::default().with_lookback(lookback);
            let outcome = label(&daily(&prices), &config).unwrap();

            for (t, value) in outcome.series.values().iter().enumerate() {
                if t < lookback {
                    assert_eq!(*value, None, "position {} should be missing", t);
                } else {
                    assert_eq!(*value, Some(prices[t] / prices[t - lookback] - 1.0));
                }
            }
        }
    }
}

#[test]
fn test_log_return_is_difference_of_logs() {
    let prices = random_walk(42, 100);
    for lookback in [1, 3, 10] {
        let config = LabelingConfig::default().with_lookback(lookback).logarithmic();
        let outcome = label(&daily(&prices), &config).unwrap();

        for t in lookback..prices.len() {
            let expected = prices[t].ln() - prices[t - lookback].ln();
            let actual = outcome.series.get(t).unwrap();
            assert!((actual - expected).abs() < 1e-12, "t={} {} vs {}", t, actual, expected);
        }
    }
}

#[test]
fn test_binary_is_sign_of_continuous() {
    let prices = random_walk(7, 80);
    let continuous = label(&daily(&prices), &LabelingConfig::default().with_lookback(2)).unwrap();
    let binary = label(&daily(&prices), &LabelingConfig::default().with_lookback(2).binary()).unwrap();

    assert_eq!(binary.series.kind(), LabelKind::Categorical);
    for (c, b) in continuous.series.values().iter().zip(binary.series.values()) {
        match (c, b) {
            (None, None) => {}
            (Some(r), Some(s)) => {
                assert!([-1.0, 0.0, 1.0].contains(s));
                assert_eq!(Sign::of(*r).map(Sign::as_f64), Some(*s));
            }
            other => panic!("misaligned positions: {:?}", other),
        }
    }
}

#[test]
fn test_binary_example_with_flat_day() {
    let prices = [24.23, 24.23, 24.09, 23.84, 24.00];
    let outcome = label(&daily(&prices), &LabelingConfig::default().binary()).unwrap();

    assert_eq!(
        outcome.series.signs(),
        vec![None, Some(Sign::Flat), Some(Sign::Down), Some(Sign::Down), Some(Sign::Up)]
    );
}

#[test]
fn test_lag_aligns_next_return() {
    let prices = random_walk(3, 30);
    let trailing = label(&daily(&prices), &LabelingConfig::default()).unwrap().series;
    let forward = label(&daily(&prices), &LabelingConfig::default().lagged()).unwrap().series;

    assert_eq!(forward.index(), trailing.index());
    for t in 0..prices.len() - 1 {
        assert_eq!(forward.get(t), trailing.get(t + 1));
    }
    assert_eq!(forward.get(prices.len() - 1), None);
    assert_eq!(forward.lag(), trailing.lag_by(2));
}

#[test]
fn test_oversized_lookback_is_all_missing() {
    let prices = random_walk(11, 10);
    for lookback in [10, 11, 500] {
        let outcome = label(&daily(&prices), &LabelingConfig::default().with_lookback(lookback)).unwrap();

        assert_eq!(outcome.series.len(), 10);
        assert!(outcome.series.is_all_missing());
        assert_eq!(
            outcome.diagnostic,
            Some(Diagnostic::InsufficientHistory { lookback, observations: 10 })
        );
    }
}

#[test]
fn test_largest_valid_lookback_defines_last_position() {
    let prices = random_walk(12, 10);
    let outcome = label(&daily(&prices), &LabelingConfig::default().with_lookback(9)).unwrap();

    assert!(outcome.diagnostic.is_none());
    assert_eq!(outcome.series.defined_count(), 1);
    assert_eq!(outcome.series.get(9), Some(prices[9] / prices[0] - 1.0));
}

#[test]
fn test_index_is_preserved() {
    let prices = daily(&random_walk(5, 15));
    let outcome = label(&prices, &LabelingConfig::default().logarithmic().binary()).unwrap();
    let expected: Vec<DateTime<Utc>> = prices.index().to_vec();
    assert_eq!(outcome.series.index(), expected.as_slice());
}
