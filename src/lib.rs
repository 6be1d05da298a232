//! # spendcast
//!
//! Forecast-model evaluation and selection for low-frequency business
//! series (monthly or quarterly spend, demand, and similar).
//!
//! Build a [`core::Series`], hand a set of candidate models to the
//! [`selection::Selector`], and get back the candidates ranked by
//! in-sample RMSE together with each one's out-of-sample forecast.
//! Individual models are also usable directly through the
//! [`models::Forecaster`] trait.

#![allow(clippy::needless_range_loop)]

pub mod core;
pub mod decompose;
pub mod error;
pub mod models;
pub mod selection;
pub mod utils;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::core::{Forecast, Period, Series};
    pub use crate::error::{ForecastError, Result};
    pub use crate::models::{BoxedForecaster, Forecaster};
    pub use crate::selection::{default_candidates, Selection, Selector};
    pub use crate::utils::{mae, mse, rmse};
}
