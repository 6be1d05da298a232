//! STL (Seasonal-Trend decomposition using LOESS).
//!
//! Iteratively refines an additive split `y = trend + seasonal + remainder`:
//! the detrended series is smoothed per cycle-subseries to estimate the
//! seasonal component, a low-pass filter removes any leftover trend from
//! that estimate, and the deseasonalized series is LOESS-smoothed for the
//! trend. Gap-free output at every position, unlike the classical method.

use crate::decompose::Decomposition;
use crate::error::{ForecastError, Result};

/// STL decomposition configuration.
#[derive(Debug, Clone)]
pub struct Stl {
    period: usize,
    /// Seasonal LOESS span (ns), forced odd.
    seasonal_span: usize,
    /// Trend LOESS span (nt), forced odd.
    trend_span: usize,
    /// Low-pass LOESS span (nl), forced odd.
    low_pass_span: usize,
    /// Inner-loop passes.
    iterations: usize,
}

impl Stl {
    /// Create a decomposer with the default spans from Cleveland et al.
    /// (1990) for the given seasonal period.
    pub fn new(period: usize) -> Self {
        let ns = period | 1;
        let nt = (1.5 * period as f64 / (1.0 - 1.5 / ns as f64)).ceil() as usize;
        Self {
            period,
            seasonal_span: ns,
            trend_span: nt | 1,
            low_pass_span: period | 1,
            iterations: 2,
        }
    }

    /// Override the seasonal smoothing span (rounded up to odd).
    pub fn with_seasonal_span(mut self, ns: usize) -> Self {
        self.seasonal_span = ns | 1;
        self
    }

    /// Override the trend smoothing span (rounded up to odd).
    pub fn with_trend_span(mut self, nt: usize) -> Self {
        self.trend_span = nt | 1;
        self
    }

    /// Override the number of inner-loop passes.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n.max(1);
        self
    }

    /// Decompose `values` into trend, seasonal, and remainder.
    ///
    /// Fails with [`ForecastError::InsufficientData`] below two full cycles.
    pub fn decompose(&self, values: &[f64]) -> Result<Decomposition> {
        let n = values.len();
        if self.period < 2 {
            return Err(ForecastError::InvalidParameter(
                "decomposition period must be at least 2".to_string(),
            ));
        }
        if n < 2 * self.period {
            return Err(ForecastError::InsufficientData {
                needed: 2 * self.period,
                got: n,
            });
        }

        let mut seasonal = vec![0.0; n];
        let mut trend = vec![0.0; n];

        for _ in 0..self.iterations {
            let detrended: Vec<f64> = values.iter().zip(&trend).map(|(y, t)| y - t).collect();

            let cycle_smoothed = self.smooth_cycle_subseries(&detrended);
            let low_pass = self.low_pass(&cycle_smoothed);
            for i in 0..n {
                seasonal[i] = cycle_smoothed[i] - low_pass[i];
            }

            let deseasonalized: Vec<f64> =
                values.iter().zip(&seasonal).map(|(y, s)| y - s).collect();
            trend = loess(&deseasonalized, self.trend_span);
        }

        let remainder: Vec<f64> = (0..n).map(|i| values[i] - trend[i] - seasonal[i]).collect();

        Ok(Decomposition {
            trend,
            seasonal,
            remainder,
        })
    }

    /// Smooth each cycle-subseries (all observations sharing a cycle
    /// position) independently, then scatter the results back.
    fn smooth_cycle_subseries(&self, detrended: &[f64]) -> Vec<f64> {
        let n = detrended.len();
        let mut result = vec![0.0; n];

        for cycle_pos in 0..self.period {
            let indices: Vec<usize> = (cycle_pos..n).step_by(self.period).collect();
            let subseries: Vec<f64> = indices.iter().map(|&i| detrended[i]).collect();
            let smoothed = loess(&subseries, self.seasonal_span);
            for (&idx, &v) in indices.iter().zip(&smoothed) {
                result[idx] = v;
            }
        }

        result
    }

    /// Low-pass filter: three passes of moving averages (period, period, 3)
    /// followed by a LOESS pass.
    fn low_pass(&self, values: &[f64]) -> Vec<f64> {
        let ma1 = boundary_moving_average(values, self.period);
        let ma2 = boundary_moving_average(&ma1, self.period);
        let ma3 = boundary_moving_average(&ma2, 3);
        loess(&ma3, self.low_pass_span)
    }
}

impl Default for Stl {
    fn default() -> Self {
        Self::new(12)
    }
}

/// Tricube-weighted local mean with span `span` (simplified LOESS, degree 0).
fn loess(values: &[f64], span: usize) -> Vec<f64> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }

    let half = span / 2;
    let mut result = vec![0.0; n];

    for i in 0..n {
        let start = i.saturating_sub(half);
        let end = (i + half + 1).min(n);
        let max_dist = half as f64 + 1.0;

        let mut weight_sum = 0.0;
        let mut value_sum = 0.0;
        for j in start..end {
            let u = (i as f64 - j as f64).abs() / max_dist;
            let w = if u < 1.0 { (1.0 - u.powi(3)).powi(3) } else { 0.0 };
            weight_sum += w;
            value_sum += w * values[j];
        }

        result[i] = if weight_sum > 0.0 {
            value_sum / weight_sum
        } else {
            values[i]
        };
    }

    result
}

/// Moving average that shrinks its window at the boundaries rather than
/// producing gaps.
fn boundary_moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let half = window / 2;
    let mut result = vec![0.0; n];

    for i in 0..n {
        let start = i.saturating_sub(half);
        let end = (i + half + 1).min(n);
        result[i] = values[start..end].iter().sum::<f64>() / (end - start) as f64;
    }

    result
}
