//! Property-based tests for forecasting models and selection.
//!
//! These tests verify invariants that should hold for all valid inputs,
//! using randomly generated series.

use proptest::prelude::*;
use spendcast::core::Series;
use spendcast::models::{
    BoxedForecaster, Forecaster, Naive, SimpleExponentialSmoothing, StlForecast,
};
use spendcast::selection::{default_candidates, Selector};
use spendcast::utils::rmse;

fn make_series(values: &[f64]) -> Series {
    Series::monthly(values.to_vec(), 2024, 1).unwrap()
}

/// Avoids extreme magnitudes and all-constant series.
fn valid_values_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    (min_len..max_len).prop_flat_map(|len| {
        prop::collection::vec(1.0..1000.0_f64, len).prop_map(|mut v| {
            for (i, val) in v.iter_mut().enumerate() {
                *val += (i as f64) * 0.001;
            }
            v
        })
    })
}

fn seasonal_values_strategy(
    min_len: usize,
    max_len: usize,
    period: usize,
) -> impl Strategy<Value = Vec<f64>> {
    (min_len..max_len).prop_flat_map(move |len| {
        (50.0..100.0_f64, 5.0..20.0_f64).prop_map(move |(base, amplitude)| {
            (0..len)
                .map(|i| {
                    base + amplitude * (2.0 * std::f64::consts::PI * i as f64 / period as f64).sin()
                })
                .collect()
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn naive_forecast_length_matches_horizon(
        values in valid_values_strategy(20, 100),
        horizon in 1usize..20
    ) {
        let series = make_series(&values);
        let mut model = Naive::new();
        model.fit(&series).unwrap();
        prop_assert_eq!(model.predict(horizon).unwrap().horizon(), horizon);
    }

    #[test]
    fn ses_forecast_length_matches_horizon(
        values in valid_values_strategy(20, 100),
        horizon in 1usize..20
    ) {
        let series = make_series(&values);
        let mut model = SimpleExponentialSmoothing::auto();
        model.fit(&series).unwrap();
        prop_assert_eq!(model.predict(horizon).unwrap().horizon(), horizon);
    }

    #[test]
    fn stl_forecast_length_matches_horizon(
        values in seasonal_values_strategy(30, 80, 12),
        horizon in 1usize..20
    ) {
        let series = make_series(&values);
        let mut model = StlForecast::new(12);
        model.fit(&series).unwrap();
        prop_assert_eq!(model.predict(horizon).unwrap().horizon(), horizon);
    }

    // Extending the horizon never changes the earlier steps.
    #[test]
    fn naive_longer_horizon_extends_shorter(
        values in valid_values_strategy(20, 100)
    ) {
        let series = make_series(&values);
        let mut model = Naive::new();
        model.fit(&series).unwrap();
        let short = model.predict(6).unwrap();
        let long = model.predict(12).unwrap();
        prop_assert_eq!(short.point(), &long.point()[..6]);
    }

    #[test]
    fn ses_longer_horizon_extends_shorter(
        values in valid_values_strategy(20, 100)
    ) {
        let series = make_series(&values);
        let mut model = SimpleExponentialSmoothing::new(0.3);
        model.fit(&series).unwrap();
        let short = model.predict(6).unwrap();
        let long = model.predict(12).unwrap();
        prop_assert_eq!(short.point(), &long.point()[..6]);
    }

    #[test]
    fn rmse_is_nonnegative_for_fitted_models(
        values in valid_values_strategy(20, 100)
    ) {
        let series = make_series(&values);
        let mut model = Naive::new();
        model.fit(&series).unwrap();
        let score = rmse(series.values(), model.fitted_values().unwrap()).unwrap();
        prop_assert!(score >= 0.0);
        prop_assert!(score.is_finite());
    }

    #[test]
    fn intervals_bracket_point_forecast(
        values in valid_values_strategy(20, 100),
        horizon in 1usize..12
    ) {
        let series = make_series(&values);
        let mut model = Naive::new();
        model.fit(&series).unwrap();
        let forecast = model.predict_with_intervals(horizon, 0.95).unwrap();
        let lower = forecast.lower().unwrap();
        let upper = forecast.upper().unwrap();
        for (i, &p) in forecast.point().iter().enumerate() {
            prop_assert!(lower[i] <= p);
            prop_assert!(upper[i] >= p);
        }
    }

    #[test]
    fn ranking_is_sorted_ascending(
        values in seasonal_values_strategy(48, 96, 12),
        horizon in 1usize..12
    ) {
        let series = make_series(&values);
        let selection = Selector::new()
            .select(&series, default_candidates(12), horizon)
            .unwrap();
        for pair in selection.ranking.windows(2) {
            prop_assert!(pair[0].rmse <= pair[1].rmse);
        }
        for result in &selection.ranking {
            prop_assert_eq!(result.forecast.horizon(), horizon);
        }
    }

    #[test]
    fn selection_never_drops_candidates(
        values in seasonal_values_strategy(30, 80, 12)
    ) {
        let series = make_series(&values);
        let candidates = default_candidates(12);
        let total = candidates.len();
        let selection = Selector::new().select(&series, candidates, 6).unwrap();
        prop_assert_eq!(selection.ranking.len() + selection.failures.len(), total);
    }

    #[test]
    fn boxed_candidates_are_independent(
        values in valid_values_strategy(20, 60)
    ) {
        let series = make_series(&values);
        let mut a: BoxedForecaster = Box::new(Naive::new());
        let b: BoxedForecaster = Box::new(Naive::new());
        a.fit(&series).unwrap();
        prop_assert!(a.is_fitted());
        prop_assert!(!b.is_fitted());
    }
}
