//! Naive forecasting model.
//!
//! Forecasts the last observed value for all future periods. Serves as the
//! floor every other candidate has to beat.

use crate::core::{Forecast, Series};
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;
use crate::utils::quantile_normal;

/// Naive forecaster that repeats the last value.
#[derive(Debug, Clone, Default)]
pub struct Naive {
    last_value: Option<f64>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
}

impl Naive {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Forecaster for Naive {
    fn fit(&mut self, series: &Series) -> Result<()> {
        let values = series.values();

        self.last_value = Some(values[values.len() - 1]);

        // Fitted values are shifted history (y_hat[t] = y[t-1])
        let mut fitted = Vec::with_capacity(values.len());
        fitted.push(f64::NAN);
        fitted.extend_from_slice(&values[..values.len() - 1]);

        // Residuals are first differences (y[t] - y[t-1])
        let residuals: Vec<f64> = values
            .iter()
            .zip(fitted.iter())
            .map(|(y, f)| y - f)
            .collect();

        self.fitted = Some(fitted);
        self.residuals = Some(residuals);
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let last = self.last_value.ok_or(ForecastError::FitRequired)?;
        if horizon == 0 {
            return Err(ForecastError::InvalidHorizon { got: 0 });
        }
        Ok(Forecast::from_values(vec![last; horizon]))
    }

    fn predict_with_intervals(&self, horizon: usize, level: f64) -> Result<Forecast> {
        let last = self.last_value.ok_or(ForecastError::FitRequired)?;
        if horizon == 0 {
            return Err(ForecastError::InvalidHorizon { got: 0 });
        }

        let residuals = self.residuals.as_ref().ok_or(ForecastError::FitRequired)?;
        let valid: Vec<f64> = residuals.iter().copied().filter(|r| !r.is_nan()).collect();
        if valid.is_empty() {
            return Ok(Forecast::from_values(vec![last; horizon]));
        }

        let sigma = (valid.iter().map(|r| r * r).sum::<f64>() / valid.len() as f64).sqrt();
        let z = quantile_normal((1.0 + level) / 2.0);

        let mut point = Vec::with_capacity(horizon);
        let mut lower = Vec::with_capacity(horizon);
        let mut upper = Vec::with_capacity(horizon);
        for h in 1..=horizon {
            // Random-walk interval widens with sqrt(h)
            let se = sigma * (h as f64).sqrt();
            point.push(last);
            lower.push(last - z * se);
            upper.push(last + z * se);
        }

        Forecast::with_intervals(point, lower, upper, level)
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &str {
        "Naive"
    }
}
