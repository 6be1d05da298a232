//! Classical moving-average decomposition.

use crate::decompose::Decomposition;
use crate::error::{ForecastError, Result};

/// Centered moving average of order `window`.
///
/// Position `i` is defined only when a full window fits around it, leaving
/// `window / 2` NaN entries at each end. For an odd window the average spans
/// `values[i - w/2 ..= i + w/2]`; for an even window it spans
/// `values[i - w/2 .. i + w/2]` (the standard half-open convention).
pub fn centered_moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let half = window / 2;
    let mut result = vec![f64::NAN; n];
    if window == 0 || window > n {
        return result;
    }

    for i in half..n.saturating_sub(half) {
        let start = i - half;
        let end = start + window;
        if end > n {
            break;
        }
        result[i] = values[start..end].iter().sum::<f64>() / window as f64;
    }
    result
}

/// Decompose a series into trend, seasonal, and remainder components using
/// the classical method:
///
/// 1. trend = centered moving average of order `period`;
/// 2. seasonal index per cycle position = mean of the detrended values at
///    that position, normalized so the indices sum to zero;
/// 3. remainder = series − trend − seasonal.
///
/// Trend and remainder carry NaN gaps of `period / 2` at each end. Fails
/// with [`ForecastError::InsufficientData`] below two full cycles.
pub fn classical_decompose(values: &[f64], period: usize) -> Result<Decomposition> {
    if period < 2 {
        return Err(ForecastError::InvalidParameter(
            "decomposition period must be at least 2".to_string(),
        ));
    }
    let n = values.len();
    if n < 2 * period {
        return Err(ForecastError::InsufficientData {
            needed: 2 * period,
            got: n,
        });
    }

    let trend = centered_moving_average(values, period);

    // Seasonal indices: average the detrended values per cycle position.
    let mut sums = vec![0.0; period];
    let mut counts = vec![0usize; period];
    for (i, (&y, &t)) in values.iter().zip(trend.iter()).enumerate() {
        if t.is_nan() {
            continue;
        }
        sums[i % period] += y - t;
        counts[i % period] += 1;
    }

    let mut indices: Vec<f64> = sums
        .iter()
        .zip(counts.iter())
        .map(|(&s, &c)| if c > 0 { s / c as f64 } else { 0.0 })
        .collect();

    // Normalize so one full cycle of indices sums to zero.
    let adjustment = indices.iter().sum::<f64>() / period as f64;
    for s in indices.iter_mut() {
        *s -= adjustment;
    }

    let seasonal: Vec<f64> = (0..n).map(|i| indices[i % period]).collect();
    let remainder: Vec<f64> = (0..n)
        .map(|i| {
            if trend[i].is_nan() {
                f64::NAN
            } else {
                values[i] - trend[i] - seasonal[i]
            }
        })
        .collect();

    Ok(Decomposition {
        trend,
        seasonal,
        remainder,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn seasonal_series(n: usize, period: usize, slope: f64, amplitude: f64) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let cycle = 2.0 * std::f64::consts::PI * i as f64 / period as f64;
                50.0 + slope * i as f64 + amplitude * cycle.sin()
            })
            .collect()
    }

    #[test]
    fn centered_ma_leaves_half_window_gaps() {
        let values: Vec<f64> = (0..10).map(|i| i as f64).collect();

        let ma = centered_moving_average(&values, 5);
        assert!(ma[0].is_nan() && ma[1].is_nan());
        assert!(ma[8].is_nan() && ma[9].is_nan());
        // mean(0..=4) = 2
        assert_relative_eq!(ma[2], 2.0, epsilon = 1e-10);
        assert_relative_eq!(ma[7], 7.0, epsilon = 1e-10);

        let ma = centered_moving_average(&values, 4);
        assert!(ma[0].is_nan() && ma[1].is_nan());
        assert!(ma[9].is_nan());
        // mean(values[0..4]) = 1.5
        assert_relative_eq!(ma[2], 1.5, epsilon = 1e-10);
    }

    #[test]
    fn centered_ma_oversized_window_is_all_nan() {
        let values = vec![1.0, 2.0, 3.0];
        let ma = centered_moving_average(&values, 4);
        assert!(ma.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn decomposition_reconstructs_where_defined() {
        let period = 12;
        let values = seasonal_series(60, period, 0.5, 10.0);

        let d = classical_decompose(&values, period).unwrap();
        assert_eq!(d.trend.len(), 60);
        assert_eq!(d.seasonal.len(), 60);
        assert_eq!(d.remainder.len(), 60);

        for i in 0..60 {
            if d.trend[i].is_nan() {
                assert!(d.remainder[i].is_nan());
                continue;
            }
            let reconstructed = d.trend[i] + d.seasonal[i] + d.remainder[i];
            assert_relative_eq!(values[i], reconstructed, epsilon = 1e-10);
        }
    }

    #[test]
    fn seasonal_indices_sum_to_zero_per_cycle() {
        let period = 12;
        let values = seasonal_series(72, period, 0.3, 8.0);

        let d = classical_decompose(&values, period).unwrap();
        let cycle_sum: f64 = d.seasonal[..period].iter().sum();
        assert_relative_eq!(cycle_sum, 0.0, epsilon = 1e-9);

        // Periodicity: position i and i + period carry the same index.
        for i in 0..60 {
            assert_relative_eq!(d.seasonal[i], d.seasonal[i + period], epsilon = 1e-12);
        }
    }

    #[test]
    fn recovers_dominant_seasonal_swing() {
        let period = 12;
        let values = seasonal_series(120, period, 0.2, 10.0);

        let d = classical_decompose(&values, period).unwrap();
        let max_index = d.seasonal[..period]
            .iter()
            .fold(f64::MIN, |acc, &s| acc.max(s));
        assert!(
            max_index > 7.0,
            "seasonal swing ±10 should show up in indices, got peak {}",
            max_index
        );
        assert!(d.seasonal_strength() > 0.8);
    }

    #[test]
    fn rejects_short_history() {
        let values = vec![1.0; 20];
        assert!(matches!(
            classical_decompose(&values, 12),
            Err(ForecastError::InsufficientData { needed: 24, got: 20 })
        ));
    }

    #[test]
    fn rejects_degenerate_period() {
        let values = vec![1.0; 20];
        assert!(matches!(
            classical_decompose(&values, 1),
            Err(ForecastError::InvalidParameter(_))
        ));
    }
}
