//! Moving-average forecasting model.
//!
//! Forecasts the mean of the last `window` observations for all future
//! periods. In-sample, the fitted values are the *centered* moving average
//! of order `window`, so they describe the smoothed level of the series
//! rather than one-step-ahead predictions. Residuals against a centered
//! smoother use future information and understate out-of-sample error;
//! treat them as a smoothness diagnostic, not a forecast-accuracy measure.

use crate::core::{Forecast, Series};
use crate::decompose::centered_moving_average;
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;
use crate::utils::quantile_normal;

/// Moving-average forecaster with a fixed window.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    window: usize,
    last_mean: Option<f64>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
    residual_sigma: Option<f64>,
}

impl MovingAverage {
    /// Create a new moving-average model with the given window size.
    pub fn new(window: usize) -> Self {
        Self {
            window,
            last_mean: None,
            fitted: None,
            residuals: None,
            residual_sigma: None,
        }
    }

    /// Get the window size.
    pub fn window(&self) -> usize {
        self.window
    }
}

impl Forecaster for MovingAverage {
    fn fit(&mut self, series: &Series) -> Result<()> {
        if self.window == 0 {
            return Err(ForecastError::InvalidParameter(
                "moving-average window must be at least 1".to_string(),
            ));
        }

        let values = series.values();
        let n = values.len();
        if n < self.window {
            return Err(ForecastError::InsufficientData {
                needed: self.window,
                got: n,
            });
        }

        self.last_mean = Some(values[n - self.window..].iter().sum::<f64>() / self.window as f64);

        let fitted = centered_moving_average(values, self.window);
        let residuals: Vec<f64> = values
            .iter()
            .zip(fitted.iter())
            .map(|(y, f)| if f.is_nan() { f64::NAN } else { y - f })
            .collect();

        let valid: Vec<f64> = residuals.iter().copied().filter(|r| !r.is_nan()).collect();
        self.residual_sigma = if valid.is_empty() {
            None
        } else {
            Some((valid.iter().map(|r| r * r).sum::<f64>() / valid.len() as f64).sqrt())
        };

        self.fitted = Some(fitted);
        self.residuals = Some(residuals);
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let mean = self.last_mean.ok_or(ForecastError::FitRequired)?;
        if horizon == 0 {
            return Err(ForecastError::InvalidHorizon { got: 0 });
        }
        Ok(Forecast::from_values(vec![mean; horizon]))
    }

    fn predict_with_intervals(&self, horizon: usize, level: f64) -> Result<Forecast> {
        let mean = self.last_mean.ok_or(ForecastError::FitRequired)?;
        if horizon == 0 {
            return Err(ForecastError::InvalidHorizon { got: 0 });
        }

        let sigma = match self.residual_sigma {
            Some(s) => s,
            None => return Ok(Forecast::from_values(vec![mean; horizon])),
        };
        let z = quantile_normal((1.0 + level) / 2.0);

        // Flat forecast, constant-width band.
        let point = vec![mean; horizon];
        let lower = vec![mean - z * sigma; horizon];
        let upper = vec![mean + z * sigma; horizon];
        Forecast::with_intervals(point, lower, upper, level)
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &str {
        "MovingAverage"
    }
}
