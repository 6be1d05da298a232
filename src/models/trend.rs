//! Classical-decomposition trend forecaster.
//!
//! Fits an ordinary least squares line through the trend component of a
//! classical decomposition and extrapolates that line. Seasonality is
//! deliberately ignored in the forecast; this model serves as a deseasoned
//! trend baseline.

use crate::core::{Forecast, Series};
use crate::decompose::classical_decompose;
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;
use crate::utils::quantile_normal;
use crate::utils::stats::linear_fit;

/// Linear trend forecaster based on classical decomposition.
#[derive(Debug, Clone)]
pub struct ClassicalTrend {
    period: usize,
    intercept: Option<f64>,
    slope: Option<f64>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
    residual_sigma: Option<f64>,
    n: usize,
}

impl ClassicalTrend {
    /// Create a new trend model with the given decomposition period.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            intercept: None,
            slope: None,
            fitted: None,
            residuals: None,
            residual_sigma: None,
            n: 0,
        }
    }

    /// Get the decomposition period.
    pub fn period(&self) -> usize {
        self.period
    }

    /// Get the fitted line as (intercept, slope) over observation offsets.
    pub fn line(&self) -> Option<(f64, f64)> {
        match (self.intercept, self.slope) {
            (Some(i), Some(s)) => Some((i, s)),
            _ => None,
        }
    }
}

impl Forecaster for ClassicalTrend {
    fn fit(&mut self, series: &Series) -> Result<()> {
        let values = series.values();
        self.n = values.len();

        let decomposition = classical_decompose(values, self.period)?;

        // OLS line through the defined part of the trend component.
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        for (t, &v) in decomposition.trend.iter().enumerate() {
            if !v.is_nan() {
                xs.push(t as f64);
                ys.push(v);
            }
        }
        let (intercept, slope) = linear_fit(&xs, &ys);

        // Fitted values are the trend component itself, gaps included.
        let fitted = decomposition.trend;
        let residuals: Vec<f64> = values
            .iter()
            .zip(&fitted)
            .map(|(y, f)| if f.is_nan() { f64::NAN } else { y - f })
            .collect();

        let valid: Vec<f64> = residuals.iter().copied().filter(|r| !r.is_nan()).collect();
        self.residual_sigma = if valid.is_empty() {
            None
        } else {
            Some((valid.iter().map(|r| r * r).sum::<f64>() / valid.len() as f64).sqrt())
        };

        self.intercept = Some(intercept);
        self.slope = Some(slope);
        self.fitted = Some(fitted);
        self.residuals = Some(residuals);
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let intercept = self.intercept.ok_or(ForecastError::FitRequired)?;
        let slope = self.slope.ok_or(ForecastError::FitRequired)?;
        if horizon == 0 {
            return Err(ForecastError::InvalidHorizon { got: 0 });
        }

        let point: Vec<f64> = (1..=horizon)
            .map(|h| intercept + slope * (self.n - 1 + h) as f64)
            .collect();
        Ok(Forecast::from_values(point))
    }

    fn predict_with_intervals(&self, horizon: usize, level: f64) -> Result<Forecast> {
        let forecast = self.predict(horizon)?;
        let sigma = match self.residual_sigma {
            Some(s) => s,
            None => return Ok(forecast),
        };

        let z = quantile_normal((1.0 + level) / 2.0);
        let lower: Vec<f64> = forecast.point().iter().map(|p| p - z * sigma).collect();
        let upper: Vec<f64> = forecast.point().iter().map(|p| p + z * sigma).collect();
        Forecast::with_intervals(forecast.point().to_vec(), lower, upper, level)
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &str {
        "ClassicalTrend"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn trending_series(n: usize, period: usize, slope: f64, amplitude: f64) -> Series {
        let values: Vec<f64> = (0..n)
            .map(|i| {
                let cycle = 2.0 * std::f64::consts::PI * i as f64 / period as f64;
                20.0 + slope * i as f64 + amplitude * cycle.sin()
            })
            .collect();
        Series::monthly(values, 2021, 1).unwrap()
    }

    #[test]
    fn recovers_linear_slope_through_seasonality() {
        let mut model = ClassicalTrend::new(12);
        model.fit(&trending_series(72, 12, 0.5, 6.0)).unwrap();

        let (_, slope) = model.line().unwrap();
        assert_relative_eq!(slope, 0.5, epsilon = 0.05);
    }

    #[test]
    fn forecast_extends_the_line() {
        let n = 72;
        let mut model = ClassicalTrend::new(12);
        model.fit(&trending_series(n, 12, 0.5, 6.0)).unwrap();

        let (intercept, slope) = model.line().unwrap();
        let preds = model.predict(6).unwrap();
        for (h, &p) in (1..=6).zip(preds.point()) {
            assert_relative_eq!(p, intercept + slope * (n - 1 + h) as f64, epsilon = 1e-10);
        }
        // Successive steps advance by exactly the slope.
        let preds = preds.point();
        for i in 1..6 {
            assert_relative_eq!(preds[i] - preds[i - 1], slope, epsilon = 1e-10);
        }
    }

    #[test]
    fn fitted_values_carry_decomposition_gaps() {
        let mut model = ClassicalTrend::new(12);
        model.fit(&trending_series(48, 12, 0.3, 4.0)).unwrap();

        let fitted = model.fitted_values().unwrap();
        for i in 0..6 {
            assert!(fitted[i].is_nan());
            assert!(fitted[47 - i].is_nan());
        }
        assert!(fitted[6..42].iter().all(|f| f.is_finite()));
    }

    #[test]
    fn intervals_have_constant_width() {
        let mut model = ClassicalTrend::new(12);
        model.fit(&trending_series(60, 12, 0.2, 5.0)).unwrap();

        let forecast = model.predict_with_intervals(6, 0.90).unwrap();
        let lower = forecast.lower().unwrap();
        let upper = forecast.upper().unwrap();
        let width = upper[0] - lower[0];
        assert!(width > 0.0);
        for i in 1..6 {
            assert_relative_eq!(upper[i] - lower[i], width, epsilon = 1e-10);
        }
    }

    #[test]
    fn requires_two_full_cycles() {
        let mut model = ClassicalTrend::new(12);
        let short = Series::monthly(vec![1.0; 18], 2021, 1).unwrap();
        assert!(matches!(
            model.fit(&short),
            Err(ForecastError::InsufficientData { needed: 24, got: 18 })
        ));
    }

    #[test]
    fn requires_fit_before_predict() {
        let model = ClassicalTrend::new(12);
        assert!(matches!(model.predict(3), Err(ForecastError::FitRequired)));
    }

    #[test]
    fn zero_horizon_is_rejected() {
        let mut model = ClassicalTrend::new(4);
        model.fit(&trending_series(24, 4, 0.1, 2.0)).unwrap();
        assert!(matches!(
            model.predict(0),
            Err(ForecastError::InvalidHorizon { got: 0 })
        ));
    }
}
