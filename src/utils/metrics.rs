//! Accuracy metrics for in-sample forecast evaluation.
//!
//! Window-based models leave NaN gaps at the fitted-value boundaries, so all
//! metrics here score only positions where both the actual and the fitted
//! value are defined.

use crate::error::{ForecastError, Result};

fn overlapping_squared_errors(actual: &[f64], fitted: &[f64]) -> Result<(f64, f64, usize)> {
    if actual.len() != fitted.len() {
        return Err(ForecastError::DimensionMismatch {
            expected: actual.len(),
            got: fitted.len(),
        });
    }

    let mut sum_sq = 0.0;
    let mut sum_abs = 0.0;
    let mut count = 0usize;
    for (a, f) in actual.iter().zip(fitted.iter()) {
        if a.is_nan() || f.is_nan() {
            continue;
        }
        let e = a - f;
        sum_sq += e * e;
        sum_abs += e.abs();
        count += 1;
    }

    if count == 0 {
        return Err(ForecastError::EmptyOverlap);
    }
    Ok((sum_sq, sum_abs, count))
}

/// Root mean squared error over the defined overlap.
///
/// Fails with [`ForecastError::EmptyOverlap`] if no position has both a
/// defined actual and fitted value (e.g. a smoothing window at least as long
/// as the series).
pub fn rmse(actual: &[f64], fitted: &[f64]) -> Result<f64> {
    mse(actual, fitted).map(f64::sqrt)
}

/// Mean squared error over the defined overlap.
pub fn mse(actual: &[f64], fitted: &[f64]) -> Result<f64> {
    let (sum_sq, _, count) = overlapping_squared_errors(actual, fitted)?;
    Ok(sum_sq / count as f64)
}

/// Mean absolute error over the defined overlap.
pub fn mae(actual: &[f64], fitted: &[f64]) -> Result<f64> {
    let (_, sum_abs, count) = overlapping_squared_errors(actual, fitted)?;
    Ok(sum_abs / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rmse_of_perfect_fit_is_zero() {
        let actual = vec![1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(rmse(&actual, &actual).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn rmse_known_values() {
        let actual = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let fitted = vec![1.5, 2.5, 2.5, 4.5, 4.5];
        // All absolute errors are 0.5
        assert_relative_eq!(rmse(&actual, &fitted).unwrap(), 0.5, epsilon = 1e-10);
        assert_relative_eq!(mse(&actual, &fitted).unwrap(), 0.25, epsilon = 1e-10);
        assert_relative_eq!(mae(&actual, &fitted).unwrap(), 0.5, epsilon = 1e-10);
    }

    #[test]
    fn nan_gaps_are_skipped() {
        let actual = vec![1.0, 2.0, 3.0, 4.0];
        let fitted = vec![f64::NAN, 2.0, 3.0, f64::NAN];
        // Only the two middle positions score, both exact.
        assert_relative_eq!(rmse(&actual, &fitted).unwrap(), 0.0, epsilon = 1e-12);

        let fitted = vec![f64::NAN, 3.0, 3.0, f64::NAN];
        // Errors: 1.0 at offset 1, 0.0 at offset 2.
        assert_relative_eq!(
            rmse(&actual, &fitted).unwrap(),
            (0.5f64).sqrt(),
            epsilon = 1e-10
        );
    }

    #[test]
    fn all_nan_fitted_is_empty_overlap() {
        let actual = vec![1.0, 2.0, 3.0];
        let fitted = vec![f64::NAN; 3];
        assert!(matches!(
            rmse(&actual, &fitted),
            Err(ForecastError::EmptyOverlap)
        ));
    }

    #[test]
    fn length_mismatch_is_rejected() {
        assert!(matches!(
            rmse(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
            Err(ForecastError::DimensionMismatch { expected: 3, got: 2 })
        ));
    }

    #[test]
    fn empty_inputs_have_no_overlap() {
        assert!(matches!(rmse(&[], &[]), Err(ForecastError::EmptyOverlap)));
    }
}
