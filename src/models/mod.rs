//! Forecasting models.
//!
//! Every model implements the [`Forecaster`] trait: fit on a
//! [`crate::core::Series`], then predict a fixed horizon with optional
//! prediction intervals.

mod holt_winters;
mod moving_average;
mod naive;
mod ses;
mod stl_forecast;
mod traits;
mod trend;

pub use holt_winters::{HoltWinters, Seasonality};
pub use moving_average::MovingAverage;
pub use naive::Naive;
pub use ses::SimpleExponentialSmoothing;
pub use stl_forecast::StlForecast;
pub use traits::{BoxedForecaster, Forecaster};
pub use trend::ClassicalTrend;
