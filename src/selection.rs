//! Model evaluation and selection.
//!
//! Fits a set of candidate models on the same series, scores each by the
//! RMSE of its in-sample fitted values, and ranks the survivors. A
//! candidate that fails at any stage (fit, scoring, prediction) is recorded
//! with its error instead of aborting the run; the selection only fails
//! outright when every candidate does.

use crate::core::{Forecast, Series};
use crate::error::{ForecastError, Result};
use crate::models::{
    BoxedForecaster, ClassicalTrend, Forecaster, HoltWinters, MovingAverage, Naive, Seasonality,
    SimpleExponentialSmoothing, StlForecast,
};
use crate::utils::rmse;

/// A successfully evaluated candidate.
#[derive(Debug, Clone)]
pub struct CandidateResult {
    /// Model name as reported by [`crate::models::Forecaster::name`].
    pub name: String,
    /// In-sample RMSE over positions where both actual and fitted are defined.
    pub rmse: f64,
    /// Fitted values, NaN at positions the model cannot fit.
    pub fitted: Vec<f64>,
    /// Residuals (actual - fitted).
    pub residuals: Vec<f64>,
    /// Out-of-sample forecast for the requested horizon.
    pub forecast: Forecast,
}

/// A candidate that failed somewhere in the pipeline.
#[derive(Debug, Clone)]
pub struct ModelFailure {
    pub name: String,
    pub error: ForecastError,
}

/// Outcome of a model selection run.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Surviving candidates, sorted by ascending RMSE. Ties keep the
    /// candidate declaration order.
    pub ranking: Vec<CandidateResult>,
    /// Candidates that failed, in declaration order.
    pub failures: Vec<ModelFailure>,
}

impl Selection {
    /// The winning candidate (lowest RMSE).
    pub fn best(&self) -> Option<&CandidateResult> {
        self.ranking.first()
    }
}

/// Runs candidates through fit, score, and predict, then ranks them.
#[derive(Debug, Clone)]
pub struct Selector {
    level: f64,
}

impl Selector {
    /// Create a selector requesting 95% prediction intervals.
    pub fn new() -> Self {
        Self { level: 0.95 }
    }

    /// Override the prediction-interval confidence level.
    pub fn with_level(mut self, level: f64) -> Self {
        self.level = level;
        self
    }

    /// Evaluate every candidate on `series` and rank the survivors.
    ///
    /// Returns [`ForecastError::InvalidHorizon`] for a zero horizon before
    /// touching any candidate, and [`ForecastError::NoViableModel`] when
    /// every candidate fails.
    pub fn select(
        &self,
        series: &Series,
        candidates: Vec<BoxedForecaster>,
        horizon: usize,
    ) -> Result<Selection> {
        if horizon == 0 {
            return Err(ForecastError::InvalidHorizon { got: 0 });
        }

        let mut ranking = Vec::new();
        let mut failures = Vec::new();

        for mut candidate in candidates {
            let name = candidate.name().to_string();
            match self.evaluate(series, candidate.as_mut(), horizon) {
                Ok(result) => ranking.push(CandidateResult { name, ..result }),
                Err(error) => failures.push(ModelFailure { name, error }),
            }
        }

        if ranking.is_empty() {
            return Err(ForecastError::NoViableModel);
        }

        // Stable sort: equal scores keep declaration order.
        ranking.sort_by(|a, b| a.rmse.total_cmp(&b.rmse));

        Ok(Selection { ranking, failures })
    }

    fn evaluate(
        &self,
        series: &Series,
        candidate: &mut dyn Forecaster,
        horizon: usize,
    ) -> Result<CandidateResult> {
        candidate.fit(series)?;

        let fitted = candidate
            .fitted_values()
            .ok_or(ForecastError::FitRequired)?
            .to_vec();
        let residuals = candidate
            .residuals()
            .ok_or(ForecastError::FitRequired)?
            .to_vec();
        let score = rmse(series.values(), &fitted)?;
        let forecast = candidate.predict_with_intervals(horizon, self.level)?;

        Ok(CandidateResult {
            name: String::new(),
            rmse: score,
            fitted,
            residuals,
            forecast,
        })
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::new()
    }
}

/// The standard candidate set for a series with the given frequency:
/// naive, moving average, SES, additive Holt-Winters, STL forecast, and
/// classical trend. The seasonal models use `frequency` as their period.
pub fn default_candidates(frequency: usize) -> Vec<BoxedForecaster> {
    vec![
        Box::new(Naive::new()),
        Box::new(MovingAverage::new(frequency.max(2))),
        Box::new(SimpleExponentialSmoothing::auto()),
        Box::new(HoltWinters::auto(frequency, Seasonality::Additive)),
        Box::new(StlForecast::new(frequency)),
        Box::new(ClassicalTrend::new(frequency)),
    ]
}
