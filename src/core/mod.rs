//! Core data structures: the immutable series container and forecast output.

mod forecast;
mod series;

pub use forecast::Forecast;
pub use series::{Period, Series};
