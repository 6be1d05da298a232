//! Forecast result structure for holding predictions.

use crate::error::{ForecastError, Result};

/// A forecast: point predictions for a horizon, with optional lower/upper
/// interval bounds at a single confidence level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forecast {
    point: Vec<f64>,
    lower: Option<Vec<f64>>,
    upper: Option<Vec<f64>>,
    /// Confidence level of the bounds, e.g. 0.95.
    level: Option<f64>,
}

impl Forecast {
    /// Create a point-only forecast.
    pub fn from_values(point: Vec<f64>) -> Self {
        Self {
            point,
            lower: None,
            upper: None,
            level: None,
        }
    }

    /// Create a forecast with interval bounds at the given confidence level.
    ///
    /// Fails with [`ForecastError::DimensionMismatch`] if the bound sequences
    /// do not match the point sequence length.
    pub fn with_intervals(
        point: Vec<f64>,
        lower: Vec<f64>,
        upper: Vec<f64>,
        level: f64,
    ) -> Result<Self> {
        if lower.len() != point.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: point.len(),
                got: lower.len(),
            });
        }
        if upper.len() != point.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: point.len(),
                got: upper.len(),
            });
        }
        Ok(Self {
            point,
            lower: Some(lower),
            upper: Some(upper),
            level: Some(level),
        })
    }

    /// Forecast horizon (number of steps).
    pub fn horizon(&self) -> usize {
        self.point.len()
    }

    pub fn is_empty(&self) -> bool {
        self.point.is_empty()
    }

    /// Point predictions, in chronological order.
    pub fn point(&self) -> &[f64] {
        &self.point
    }

    /// Lower interval bounds, if the producing model supports them.
    pub fn lower(&self) -> Option<&[f64]> {
        self.lower.as_deref()
    }

    /// Upper interval bounds, if the producing model supports them.
    pub fn upper(&self) -> Option<&[f64]> {
        self.upper.as_deref()
    }

    /// Confidence level of the bounds.
    pub fn level(&self) -> Option<f64> {
        self.level
    }

    pub fn has_intervals(&self) -> bool {
        self.lower.is_some() && self.upper.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_only_forecast() {
        let f = Forecast::from_values(vec![1.0, 2.0, 3.0]);

        assert_eq!(f.horizon(), 3);
        assert!(!f.is_empty());
        assert!(!f.has_intervals());
        assert_eq!(f.point(), &[1.0, 2.0, 3.0]);
        assert!(f.lower().is_none());
        assert!(f.upper().is_none());
        assert!(f.level().is_none());
    }

    #[test]
    fn forecast_with_intervals() {
        let f = Forecast::with_intervals(vec![2.0, 3.0], vec![1.0, 2.0], vec![3.0, 4.0], 0.95)
            .unwrap();

        assert!(f.has_intervals());
        assert_eq!(f.lower().unwrap(), &[1.0, 2.0]);
        assert_eq!(f.upper().unwrap(), &[3.0, 4.0]);
        assert_eq!(f.level(), Some(0.95));
    }

    #[test]
    fn intervals_must_match_point_length() {
        let result = Forecast::with_intervals(vec![1.0, 2.0], vec![0.5], vec![1.5, 2.5], 0.8);
        assert!(matches!(
            result,
            Err(ForecastError::DimensionMismatch { expected: 2, got: 1 })
        ));

        let result = Forecast::with_intervals(vec![1.0], vec![0.5], vec![1.5, 2.5], 0.8);
        assert!(matches!(
            result,
            Err(ForecastError::DimensionMismatch { expected: 1, got: 2 })
        ));
    }

    #[test]
    fn default_forecast_is_empty() {
        let f = Forecast::default();
        assert!(f.is_empty());
        assert_eq!(f.horizon(), 0);
    }
}
