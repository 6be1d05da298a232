//! Simple Exponential Smoothing (SES) forecasting model.
//!
//! Suitable for data with no clear trend or seasonality. Produces a flat
//! forecast at the final smoothed level.

use crate::core::{Forecast, Series};
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;
use crate::utils::optimization::{nelder_mead, NelderMeadConfig};
use crate::utils::quantile_normal;

const ALPHA_MIN: f64 = 0.0001;
const ALPHA_MAX: f64 = 0.9999;

/// Simple Exponential Smoothing forecaster.
///
/// The model equation is `level_t = α·y_t + (1-α)·level_{t-1}` with the
/// level initialized to the first observation. The smoothing parameter α
/// can be fixed or optimized against the in-sample sum of squared errors.
#[derive(Debug, Clone)]
pub struct SimpleExponentialSmoothing {
    alpha: Option<f64>,
    optimize: bool,
    level: Option<f64>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
    residual_variance: Option<f64>,
}

/// Result of one smoothing pass over the series.
struct SmoothingPass {
    level: f64,
    fitted: Vec<f64>,
    residuals: Vec<f64>,
    sse: f64,
}

fn smoothing_pass(values: &[f64], alpha: f64) -> SmoothingPass {
    let mut level = values[0];
    let mut fitted = Vec::with_capacity(values.len());
    let mut residuals = Vec::with_capacity(values.len());
    let mut sse = 0.0;

    // First fitted value is the initial level; its residual is zero.
    fitted.push(level);
    residuals.push(0.0);

    for &y in &values[1..] {
        let error = y - level;
        fitted.push(level);
        residuals.push(error);
        sse += error * error;
        level = alpha * y + (1.0 - alpha) * level;
    }

    SmoothingPass {
        level,
        fitted,
        residuals,
        sse,
    }
}

impl SimpleExponentialSmoothing {
    /// Create a new SES model with a fixed smoothing parameter. Values
    /// outside (0, 1) are clamped into the open interval.
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha: Some(alpha.clamp(ALPHA_MIN, ALPHA_MAX)),
            optimize: false,
            level: None,
            fitted: None,
            residuals: None,
            residual_variance: None,
        }
    }

    /// Create a new SES model that optimizes α to minimize the in-sample
    /// sum of squared errors.
    pub fn auto() -> Self {
        Self {
            alpha: None,
            optimize: true,
            level: None,
            fitted: None,
            residuals: None,
            residual_variance: None,
        }
    }

    /// Get the smoothing parameter (set after fit when auto-optimized).
    pub fn alpha(&self) -> Option<f64> {
        self.alpha
    }

    /// Get the final smoothed level.
    pub fn level(&self) -> Option<f64> {
        self.level
    }

    fn optimize_alpha(values: &[f64]) -> f64 {
        let config = NelderMeadConfig {
            max_iter: 500,
            tolerance: 1e-8,
            ..Default::default()
        };

        let result = nelder_mead(
            |params| smoothing_pass(values, params[0]).sse,
            &[0.5],
            Some(&[(ALPHA_MIN, ALPHA_MAX)]),
            config,
        );

        result.optimal_point[0].clamp(ALPHA_MIN, ALPHA_MAX)
    }
}

impl Default for SimpleExponentialSmoothing {
    fn default() -> Self {
        Self::auto()
    }
}

impl Forecaster for SimpleExponentialSmoothing {
    fn fit(&mut self, series: &Series) -> Result<()> {
        let values = series.values();

        if self.optimize {
            self.alpha = Some(Self::optimize_alpha(values));
        }
        let alpha = self.alpha.ok_or(ForecastError::FitRequired)?;

        let pass = smoothing_pass(values, alpha);

        // Residual variance excludes the zero residual at position 0.
        let tail = &pass.residuals[1..];
        self.residual_variance = if tail.is_empty() {
            None
        } else {
            Some(tail.iter().map(|r| r * r).sum::<f64>() / tail.len() as f64)
        };

        self.level = Some(pass.level);
        self.fitted = Some(pass.fitted);
        self.residuals = Some(pass.residuals);
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let level = self.level.ok_or(ForecastError::FitRequired)?;
        if horizon == 0 {
            return Err(ForecastError::InvalidHorizon { got: 0 });
        }
        Ok(Forecast::from_values(vec![level; horizon]))
    }

    fn predict_with_intervals(&self, horizon: usize, level: f64) -> Result<Forecast> {
        let current_level = self.level.ok_or(ForecastError::FitRequired)?;
        let alpha = self.alpha.ok_or(ForecastError::FitRequired)?;
        if horizon == 0 {
            return Err(ForecastError::InvalidHorizon { got: 0 });
        }

        let variance = match self.residual_variance {
            Some(v) => v,
            None => return Ok(Forecast::from_values(vec![current_level; horizon])),
        };

        let z = quantile_normal((1.0 + level) / 2.0);
        let point = vec![current_level; horizon];
        let mut lower = Vec::with_capacity(horizon);
        let mut upper = Vec::with_capacity(horizon);

        for h in 1..=horizon {
            // Var(e_{n+h}) = sigma^2 * (1 + sum_{j=1}^{h-1} (1-alpha)^{2j})
            let factor = if h == 1 {
                1.0
            } else {
                let beta2 = (1.0 - alpha) * (1.0 - alpha);
                if (1.0 - beta2).abs() < 1e-10 {
                    h as f64
                } else {
                    1.0 + beta2 * (1.0 - beta2.powi((h - 1) as i32)) / (1.0 - beta2)
                }
            };
            let se = (variance * factor).sqrt();
            lower.push(current_level - z * se);
            upper.push(current_level + z * se);
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
        "SimpleExponentialSmoothing"
    }
}
