//! Series data structure for representing a univariate periodic time series.

use crate::error::{ForecastError, Result};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar period: a year plus a 1-based sub-period index within the cycle
/// (month number for monthly data, quarter number for quarterly data).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub year: i32,
    pub index: usize,
}

impl Period {
    pub fn new(year: i32, index: usize) -> Self {
        Self { year, index }
    }
}

/// An ordered sequence of real-valued observations with a start period and an
/// integer sampling frequency (observations per cycle, e.g. 12 for monthly).
///
/// Immutable once constructed; every accessor borrows.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    values: Vec<f64>,
    start: Period,
    frequency: usize,
}

impl Series {
    /// Create a new series.
    ///
    /// Fails with [`ForecastError::InvalidSeries`] if the value sequence is
    /// empty, the frequency is zero, the start index falls outside the cycle,
    /// or any observation is NaN/infinite.
    pub fn new(values: Vec<f64>, start: Period, frequency: usize) -> Result<Self> {
        if values.is_empty() {
            return Err(ForecastError::InvalidSeries("empty values".to_string()));
        }
        if frequency == 0 {
            return Err(ForecastError::InvalidSeries(
                "frequency must be positive".to_string(),
            ));
        }
        if start.index == 0 || start.index > frequency {
            return Err(ForecastError::InvalidSeries(format!(
                "start index {} outside cycle of length {}",
                start.index, frequency
            )));
        }
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(ForecastError::InvalidSeries(format!(
                "non-finite observation at offset {}",
                pos
            )));
        }

        Ok(Self {
            values,
            start,
            frequency,
        })
    }

    /// Convenience constructor for monthly data (frequency 12).
    pub fn monthly(values: Vec<f64>, year: i32, month: usize) -> Result<Self> {
        Self::new(values, Period::new(year, month), 12)
    }

    /// Convenience constructor for quarterly data (frequency 4).
    pub fn quarterly(values: Vec<f64>, year: i32, quarter: usize) -> Result<Self> {
        Self::new(values, Period::new(year, quarter), 4)
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// A valid series is never empty; provided for slice-like symmetry.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Observations per cycle.
    pub fn frequency(&self) -> usize {
        self.frequency
    }

    /// Start period of the series.
    pub fn start(&self) -> Period {
        self.start
    }

    /// All observations in order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Observation at an integer offset from the start.
    pub fn value(&self, offset: usize) -> Result<f64> {
        self.values
            .get(offset)
            .copied()
            .ok_or(ForecastError::IndexOutOfBounds {
                index: offset,
                size: self.values.len(),
            })
    }

    /// Last observation.
    pub fn last(&self) -> f64 {
        // Constructor guarantees at least one value.
        self.values[self.values.len() - 1]
    }

    /// Number of complete seasonal cycles in the series.
    pub fn cycles(&self) -> usize {
        self.values.len() / self.frequency
    }

    /// Calendar period implied by an offset (offsets past the end address
    /// future periods, which is how forecast steps are labelled).
    pub fn period_at(&self, offset: usize) -> Period {
        let absolute = (self.start.index - 1) + offset;
        Period {
            year: self.start.year + (absolute / self.frequency) as i32,
            index: absolute % self.frequency + 1,
        }
    }

    /// Display label for the period at an offset, e.g. `"1962 Mar"` for
    /// monthly data, `"1962 Q1"` for quarterly, `"1962"` for annual.
    pub fn label(&self, offset: usize) -> String {
        let p = self.period_at(offset);
        match self.frequency {
            1 => format!("{}", p.year),
            4 => format!("{} Q{}", p.year, p.index),
            12 => format!("{} {}", p.year, MONTH_NAMES[p.index - 1]),
            _ => format!("{}:{:02}", p.year, p.index),
        }
    }

    /// Sub-range view as a new series, with the start period adjusted.
    pub fn slice(&self, start: usize, end: usize) -> Result<Series> {
        if start >= end {
            return Err(ForecastError::InvalidParameter(
                "slice start must be before end".to_string(),
            ));
        }
        if end > self.values.len() {
            return Err(ForecastError::IndexOutOfBounds {
                index: end,
                size: self.values.len(),
            });
        }

        Ok(Series {
            values: self.values[start..end].to_vec(),
            start: self.period_at(start),
            frequency: self.frequency,
        })
    }
}
