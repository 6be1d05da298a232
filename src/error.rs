//! Error types for the spendcast library.

use thiserror::Error;

/// Result type alias for forecasting operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while building series, fitting models, scoring,
/// or selecting a winner.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForecastError {
    /// Malformed series input (empty values, zero frequency, non-finite data).
    #[error("invalid series: {0}")]
    InvalidSeries(String),

    /// Not enough history for the requested operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Forecast horizon must be at least one period.
    #[error("invalid horizon: {got}")]
    InvalidHorizon { got: usize },

    /// No position where both actual and fitted values are defined.
    #[error("no overlapping positions to score")]
    EmptyOverlap,

    /// Model must be fitted before prediction.
    #[error("model must be fitted before prediction")]
    FitRequired,

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Sequence lengths disagree.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Offset outside the series.
    #[error("index out of bounds: {index} (size: {size})")]
    IndexOutOfBounds { index: usize, size: usize },

    /// Every candidate model failed; there is no ranking to return.
    #[error("no candidate model produced a usable forecast")]
    NoViableModel,
}
