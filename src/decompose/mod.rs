//! Trend/seasonal/remainder decomposition.
//!
//! Two decomposers are provided:
//! - [`classical::classical_decompose`]: centered moving-average trend with
//!   per-position seasonal means (the textbook method; trend and remainder
//!   have NaN gaps of half a window at each end).
//! - [`stl::Stl`]: seasonal-trend decomposition using LOESS-style smoothing,
//!   which produces gap-free components.

pub mod classical;
pub mod stl;

pub use classical::{centered_moving_average, classical_decompose};
pub use stl::Stl;

/// Additive decomposition of a series: `y = trend + seasonal + remainder`
/// at every position where the trend is defined.
#[derive(Debug, Clone)]
pub struct Decomposition {
    /// Trend component (may contain NaN edge gaps for the classical method).
    pub trend: Vec<f64>,
    /// Seasonal component, defined everywhere.
    pub seasonal: Vec<f64>,
    /// Remainder, NaN wherever the trend is NaN.
    pub remainder: Vec<f64>,
}

impl Decomposition {
    /// Seasonal strength in [0, 1]; values near 1 indicate strong
    /// seasonality. Only positions with a defined remainder contribute.
    pub fn seasonal_strength(&self) -> f64 {
        component_strength(&self.seasonal, &self.remainder)
    }

    /// Trend strength in [0, 1]; values near 1 indicate a strong trend.
    pub fn trend_strength(&self) -> f64 {
        component_strength(&self.trend, &self.remainder)
    }
}

/// `max(0, 1 - Var(remainder) / Var(component + remainder))` over defined
/// positions.
fn component_strength(component: &[f64], remainder: &[f64]) -> f64 {
    let mut rem = Vec::new();
    let mut combined = Vec::new();
    for (c, r) in component.iter().zip(remainder.iter()) {
        if c.is_nan() || r.is_nan() {
            continue;
        }
        rem.push(*r);
        combined.push(c + r);
    }

    let var_combined = crate::utils::stats::variance(&combined);
    if !var_combined.is_finite() || var_combined < 1e-10 {
        return 0.0;
    }
    (1.0 - crate::utils::stats::variance(&rem) / var_combined).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strengths_skip_nan_positions_and_stay_in_range() {
        let d = Decomposition {
            trend: vec![f64::NAN, 1.0, 2.0, 3.0, f64::NAN],
            seasonal: vec![0.5, -0.5, 0.5, -0.5, 0.5],
            remainder: vec![f64::NAN, 0.01, -0.02, 0.01, f64::NAN],
        };

        let ts = d.trend_strength();
        let ss = d.seasonal_strength();
        assert!((0.0..=1.0).contains(&ts));
        assert!((0.0..=1.0).contains(&ss));
        assert!(ts > 0.9, "clean trend should dominate its remainder: {}", ts);
    }

    #[test]
    fn flat_decomposition_has_zero_strength() {
        let d = Decomposition {
            trend: vec![5.0; 8],
            seasonal: vec![0.0; 8],
            remainder: vec![0.0; 8],
        };
        assert_eq!(d.seasonal_strength(), 0.0);
        assert_eq!(d.trend_strength(), 0.0);
    }
}
