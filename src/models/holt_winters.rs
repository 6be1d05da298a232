//! Holt-Winters (triple exponential smoothing) forecasting model.
//!
//! Handles data with both trend and seasonality. Smoothing parameters can
//! be fixed or optimized against the in-sample sum of squared errors.

use crate::core::{Forecast, Series};
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;
use crate::utils::optimization::{nelder_mead, NelderMeadConfig};
use crate::utils::quantile_normal;

const PARAM_MIN: f64 = 0.0001;
const PARAM_MAX: f64 = 0.9999;

/// Type of seasonal component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Seasonality {
    /// Additive seasonality: `y_t = l_t + b_t + s_t + e_t`
    #[default]
    Additive,
    /// Multiplicative seasonality: `y_t = (l_t + b_t) * s_t + e_t`
    Multiplicative,
}

/// Holt-Winters forecaster.
///
/// Additive update equations:
/// - Level: `l_t = α(y_t - s_{t-m}) + (1-α)(l_{t-1} + b_{t-1})`
/// - Trend: `b_t = β(l_t - l_{t-1}) + (1-β)b_{t-1}`
/// - Seasonal: `s_t = γ(y_t - l_t) + (1-γ)s_{t-m}`
/// - Forecast: `ŷ_{t+h} = l_t + h·b_t + s_{t+h-m}`
///
/// The multiplicative variant divides instead of subtracting where the
/// seasonal index enters, and multiplies the forecast by the index.
#[derive(Debug, Clone)]
pub struct HoltWinters {
    alpha: Option<f64>,
    beta: Option<f64>,
    gamma: Option<f64>,
    period: usize,
    seasonality: Seasonality,
    optimize: bool,
    level: Option<f64>,
    trend: Option<f64>,
    seasonals: Option<Vec<f64>>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
    residual_variance: Option<f64>,
    n: usize,
}

/// Full smoothing state after one pass over the series.
struct HwPass {
    level: f64,
    trend: f64,
    seasonals: Vec<f64>,
    fitted: Vec<f64>,
    residuals: Vec<f64>,
    sse: f64,
}

/// Initialize level, trend, and seasonal indices from the first cycle.
fn initial_state(values: &[f64], period: usize, seasonality: Seasonality) -> (f64, f64, Vec<f64>) {
    let first_cycle = &values[..period];
    let level = first_cycle.iter().sum::<f64>() / period as f64;

    // Average seasonal difference over the first two cycles.
    let trend = (0..period)
        .map(|i| (values[period + i] - values[i]) / period as f64)
        .sum::<f64>()
        / period as f64;

    let mut seasonals: Vec<f64> = match seasonality {
        Seasonality::Additive => first_cycle.iter().map(|y| y - level).collect(),
        Seasonality::Multiplicative => first_cycle
            .iter()
            .map(|y| if level.abs() > 1e-10 { y / level } else { 1.0 })
            .collect(),
    };
    normalize_seasonals(&mut seasonals, seasonality);

    (level, trend, seasonals)
}

/// Additive indices sum to zero; multiplicative indices average to one.
fn normalize_seasonals(seasonals: &mut [f64], seasonality: Seasonality) {
    let period = seasonals.len();
    if period == 0 {
        return;
    }
    match seasonality {
        Seasonality::Additive => {
            let adjustment = seasonals.iter().sum::<f64>() / period as f64;
            for s in seasonals.iter_mut() {
                *s -= adjustment;
            }
        }
        Seasonality::Multiplicative => {
            let mean = seasonals.iter().sum::<f64>() / period as f64;
            if mean.abs() > 1e-10 {
                for s in seasonals.iter_mut() {
                    *s /= mean;
                }
            }
        }
    }
}

/// Run the smoothing recursion over the whole series. The first cycle seeds
/// the state, so its fitted values are the observations themselves with zero
/// residuals.
fn run_pass(
    values: &[f64],
    alpha: f64,
    beta: f64,
    gamma: f64,
    period: usize,
    seasonality: Seasonality,
) -> HwPass {
    let (mut level, mut trend, mut seasonals) = initial_state(values, period, seasonality);

    let mut fitted = Vec::with_capacity(values.len());
    let mut residuals = Vec::with_capacity(values.len());
    let mut sse = 0.0;

    fitted.extend_from_slice(&values[..period]);
    residuals.extend(std::iter::repeat(0.0).take(period));

    for (t, &y) in values.iter().enumerate().skip(period) {
        let season_idx = t % period;
        let s = seasonals[season_idx];

        let forecast = match seasonality {
            Seasonality::Additive => level + trend + s,
            Seasonality::Multiplicative => (level + trend) * s,
        };
        let error = y - forecast;
        fitted.push(forecast);
        residuals.push(error);
        sse += error * error;

        let level_prev = level;
        match seasonality {
            Seasonality::Additive => {
                level = alpha * (y - s) + (1.0 - alpha) * (level_prev + trend);
                trend = beta * (level - level_prev) + (1.0 - beta) * trend;
                seasonals[season_idx] = gamma * (y - level) + (1.0 - gamma) * s;
            }
            Seasonality::Multiplicative => {
                let deseasonalized = if s.abs() > 1e-10 { y / s } else { y };
                level = alpha * deseasonalized + (1.0 - alpha) * (level_prev + trend);
                trend = beta * (level - level_prev) + (1.0 - beta) * trend;
                if level.abs() > 1e-10 {
                    seasonals[season_idx] = gamma * (y / level) + (1.0 - gamma) * s;
                }
            }
        }
    }

    HwPass {
        level,
        trend,
        seasonals,
        fitted,
        residuals,
        sse,
    }
}

impl HoltWinters {
    /// Create a new Holt-Winters model with fixed parameters. Parameters
    /// outside (0, 1) are clamped into the open interval.
    pub fn new(alpha: f64, beta: f64, gamma: f64, period: usize, seasonality: Seasonality) -> Self {
        Self {
            alpha: Some(alpha.clamp(PARAM_MIN, PARAM_MAX)),
            beta: Some(beta.clamp(PARAM_MIN, PARAM_MAX)),
            gamma: Some(gamma.clamp(PARAM_MIN, PARAM_MAX)),
            period,
            seasonality,
            optimize: false,
            level: None,
            trend: None,
            seasonals: None,
            fitted: None,
            residuals: None,
            residual_variance: None,
            n: 0,
        }
    }

    /// Fixed-parameter model with additive seasonality.
    pub fn additive(alpha: f64, beta: f64, gamma: f64, period: usize) -> Self {
        Self::new(alpha, beta, gamma, period, Seasonality::Additive)
    }

    /// Fixed-parameter model with multiplicative seasonality.
    pub fn multiplicative(alpha: f64, beta: f64, gamma: f64, period: usize) -> Self {
        Self::new(alpha, beta, gamma, period, Seasonality::Multiplicative)
    }

    /// Model that optimizes α, β, γ to minimize the in-sample SSE.
    pub fn auto(period: usize, seasonality: Seasonality) -> Self {
        Self {
            alpha: None,
            beta: None,
            gamma: None,
            period,
            seasonality,
            optimize: true,
            level: None,
            trend: None,
            seasonals: None,
            fitted: None,
            residuals: None,
            residual_variance: None,
            n: 0,
        }
    }

    pub fn alpha(&self) -> Option<f64> {
        self.alpha
    }

    pub fn beta(&self) -> Option<f64> {
        self.beta
    }

    pub fn gamma(&self) -> Option<f64> {
        self.gamma
    }

    /// Get the seasonal period.
    pub fn period(&self) -> usize {
        self.period
    }

    /// Get the seasonality type.
    pub fn seasonality(&self) -> Seasonality {
        self.seasonality
    }

    /// Get the final level state.
    pub fn level(&self) -> Option<f64> {
        self.level
    }

    /// Get the final trend state.
    pub fn trend(&self) -> Option<f64> {
        self.trend
    }

    /// Get the final seasonal indices (length `period`).
    pub fn seasonals(&self) -> Option<&[f64]> {
        self.seasonals.as_deref()
    }

    fn optimize_params(values: &[f64], period: usize, seasonality: Seasonality) -> (f64, f64, f64) {
        let config = NelderMeadConfig {
            max_iter: 1000,
            tolerance: 1e-8,
            ..Default::default()
        };

        let result = nelder_mead(
            |p| run_pass(values, p[0], p[1], p[2], period, seasonality).sse,
            &[0.3, 0.1, 0.1],
            Some(&[
                (PARAM_MIN, PARAM_MAX),
                (PARAM_MIN, PARAM_MAX),
                (PARAM_MIN, PARAM_MAX),
            ]),
            config,
        );

        (
            result.optimal_point[0].clamp(PARAM_MIN, PARAM_MAX),
            result.optimal_point[1].clamp(PARAM_MIN, PARAM_MAX),
            result.optimal_point[2].clamp(PARAM_MIN, PARAM_MAX),
        )
    }

}

impl Default for HoltWinters {
    fn default() -> Self {
        Self::auto(12, Seasonality::Additive)
    }
}

impl Forecaster for HoltWinters {
    fn fit(&mut self, series: &Series) -> Result<()> {
        if self.period < 2 {
            return Err(ForecastError::InvalidParameter(
                "seasonal period must be at least 2".to_string(),
            ));
        }

        let values = series.values();
        if values.len() < 2 * self.period {
            return Err(ForecastError::InsufficientData {
                needed: 2 * self.period,
                got: values.len(),
            });
        }
        self.n = values.len();

        if self.optimize {
            let (alpha, beta, gamma) = Self::optimize_params(values, self.period, self.seasonality);
            self.alpha = Some(alpha);
            self.beta = Some(beta);
            self.gamma = Some(gamma);
        }
        let alpha = self.alpha.ok_or(ForecastError::FitRequired)?;
        let beta = self.beta.ok_or(ForecastError::FitRequired)?;
        let gamma = self.gamma.ok_or(ForecastError::FitRequired)?;

        let pass = run_pass(values, alpha, beta, gamma, self.period, self.seasonality);

        // Residual variance over the positions beyond the seed cycle.
        let tail = &pass.residuals[self.period..];
        self.residual_variance = if tail.is_empty() {
            None
        } else {
            Some(tail.iter().map(|r| r * r).sum::<f64>() / tail.len() as f64)
        };

        self.level = Some(pass.level);
        self.trend = Some(pass.trend);
        self.seasonals = Some(pass.seasonals);
        self.fitted = Some(pass.fitted);
        self.residuals = Some(pass.residuals);
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let level = self.level.ok_or(ForecastError::FitRequired)?;
        let trend = self.trend.ok_or(ForecastError::FitRequired)?;
        let seasonals = self.seasonals.as_ref().ok_or(ForecastError::FitRequired)?;
        if horizon == 0 {
            return Err(ForecastError::InvalidHorizon { got: 0 });
        }

        let point: Vec<f64> = (1..=horizon)
            .map(|h| {
                // Future offset n+h-1 shares a cycle position with (n+h-1) % period.
                let s = seasonals[(self.n + h - 1) % self.period];
                match self.seasonality {
                    Seasonality::Additive => level + (h as f64) * trend + s,
                    Seasonality::Multiplicative => (level + (h as f64) * trend) * s,
                }
            })
            .collect();

        Ok(Forecast::from_values(point))
    }

    fn predict_with_intervals(&self, horizon: usize, level: f64) -> Result<Forecast> {
        let forecast = self.predict(horizon)?;
        let variance = match self.residual_variance {
            Some(v) => v,
            None => return Ok(forecast),
        };

        let z = quantile_normal((1.0 + level) / 2.0);
        let mut lower = Vec::with_capacity(horizon);
        let mut upper = Vec::with_capacity(horizon);

        for (h, &pred) in (1..=horizon).zip(forecast.point()) {
            // Variance grows stepwise with each full cycle ahead.
            let k = ((h - 1) / self.period) + 1;
            let se = (variance * k as f64).sqrt();
            lower.push(pred - z * se);
            upper.push(pred + z * se);
        }

        Forecast::with_intervals(forecast.point().to_vec(), lower, upper, level)
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &str {
        match self.seasonality {
            Seasonality::Additive => "HoltWinters(additive)",
            Seasonality::Multiplicative => "HoltWinters(multiplicative)",
        }
    }
}
