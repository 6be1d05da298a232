//! STL decomposition forecaster.
//!
//! Decomposes the series with [`Stl`], forecasts the seasonally adjusted
//! part (trend + remainder) with auto-tuned simple exponential smoothing,
//! and re-adds the last cycle of seasonal indices to the forecast.

use crate::core::{Forecast, Series};
use crate::decompose::Stl;
use crate::error::{ForecastError, Result};
use crate::models::{Forecaster, SimpleExponentialSmoothing};

/// Seasonal forecaster built on STL decomposition.
#[derive(Debug, Clone)]
pub struct StlForecast {
    period: usize,
    ses: Option<SimpleExponentialSmoothing>,
    seasonal: Option<Vec<f64>>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
    n: usize,
}

impl StlForecast {
    /// Create a new STL forecaster with the given seasonal period.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            ses: None,
            seasonal: None,
            fitted: None,
            residuals: None,
            n: 0,
        }
    }

    /// Get the seasonal period.
    pub fn period(&self) -> usize {
        self.period
    }

    /// Seasonal index applied at forecast step `h`: the value from the last
    /// observed cycle at the same cycle position.
    fn seasonal_at(&self, seasonal: &[f64], h: usize) -> f64 {
        seasonal[self.n - self.period + ((h - 1) % self.period)]
    }
}

impl Forecaster for StlForecast {
    fn fit(&mut self, series: &Series) -> Result<()> {
        let values = series.values();
        self.n = values.len();

        let decomposition = Stl::new(self.period).decompose(values)?;

        // SES on the seasonally adjusted series.
        let adjusted: Vec<f64> = values
            .iter()
            .zip(&decomposition.seasonal)
            .map(|(y, s)| y - s)
            .collect();
        let adjusted_series = Series::new(adjusted, series.start(), series.frequency())?;

        let mut ses = SimpleExponentialSmoothing::auto();
        ses.fit(&adjusted_series)?;

        let fitted: Vec<f64> = ses
            .fitted_values()
            .ok_or(ForecastError::FitRequired)?
            .iter()
            .zip(&decomposition.seasonal)
            .map(|(f, s)| f + s)
            .collect();
        let residuals: Vec<f64> = values.iter().zip(&fitted).map(|(y, f)| y - f).collect();

        self.ses = Some(ses);
        self.seasonal = Some(decomposition.seasonal);
        self.fitted = Some(fitted);
        self.residuals = Some(residuals);
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let ses = self.ses.as_ref().ok_or(ForecastError::FitRequired)?;
        let seasonal = self.seasonal.as_ref().ok_or(ForecastError::FitRequired)?;

        let base = ses.predict(horizon)?;
        let point: Vec<f64> = (1..=horizon)
            .zip(base.point())
            .map(|(h, p)| p + self.seasonal_at(seasonal, h))
            .collect();

        Ok(Forecast::from_values(point))
    }

    fn predict_with_intervals(&self, horizon: usize, level: f64) -> Result<Forecast> {
        let ses = self.ses.as_ref().ok_or(ForecastError::FitRequired)?;
        let seasonal = self.seasonal.as_ref().ok_or(ForecastError::FitRequired)?;

        let base = ses.predict_with_intervals(horizon, level)?;
        let offsets: Vec<f64> = (1..=horizon).map(|h| self.seasonal_at(seasonal, h)).collect();

        let point: Vec<f64> = base.point().iter().zip(&offsets).map(|(p, s)| p + s).collect();
        match (base.lower(), base.upper()) {
            (Some(lo), Some(hi)) => {
                let lower: Vec<f64> = lo.iter().zip(&offsets).map(|(v, s)| v + s).collect();
                let upper: Vec<f64> = hi.iter().zip(&offsets).map(|(v, s)| v + s).collect();
                Forecast::with_intervals(point, lower, upper, level)
            }
            _ => Ok(Forecast::from_values(point)),
        }
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &str {
        "StlForecast"
    }
}
