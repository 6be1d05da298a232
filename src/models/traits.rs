//! Forecaster trait defining the common interface for all models.

use crate::core::{Forecast, Series};
use crate::error::Result;

/// Common interface for all forecasting models.
///
/// The trait is object-safe, so candidates can be collected as
/// `Box<dyn Forecaster>` and handed to the selector together.
pub trait Forecaster {
    /// Fit the model to the series.
    fn fit(&mut self, series: &Series) -> Result<()>;

    /// Generate point predictions for the specified horizon.
    fn predict(&self, horizon: usize) -> Result<Forecast>;

    /// Generate predictions with prediction intervals at the given
    /// confidence level.
    fn predict_with_intervals(&self, horizon: usize, level: f64) -> Result<Forecast> {
        // Default implementation just returns point predictions
        let _ = level;
        self.predict(horizon)
    }

    /// Get the fitted values (in-sample one-step predictions). Positions
    /// the model cannot fit are NaN.
    fn fitted_values(&self) -> Option<&[f64]>;

    /// Get the residuals (actual - fitted), NaN wherever fitted is NaN.
    fn residuals(&self) -> Option<&[f64]>;

    /// Get the model name.
    fn name(&self) -> &str;

    /// Check if the model has been fitted.
    fn is_fitted(&self) -> bool {
        self.fitted_values().is_some()
    }
}

/// Type alias for boxed forecaster trait objects.
pub type BoxedForecaster = Box<dyn Forecaster>;
