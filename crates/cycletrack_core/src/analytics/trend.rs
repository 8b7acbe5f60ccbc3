//! Least-squares trend over recent cycle lengths.
//!
//! Cycles are treated as evenly spaced samples: `x` is the chronological
//! index, not the calendar date.

use crate::analytics::intervals::{recent_lengths, CycleInterval};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Direction of recent cycle length change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Trend {
    Lengthening,
    Shortening,
    Stable,
    InsufficientData,
}

impl Trend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lengthening => "lengthening",
            Self::Shortening => "shortening",
            Self::Stable => "stable",
            Self::InsufficientData => "insufficient-data",
        }
    }
}

impl Display for Trend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of [`classify_trend`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendParams {
    /// Number of most recent lengths regressed.
    pub window: usize,
    /// Total completed cycles required before any trend is reported.
    pub min_intervals: usize,
    /// Absolute slope (days per cycle) treated as noise.
    pub slope_threshold: f64,
}

/// Classifies the slope of the last `params.window` cycle lengths.
pub fn classify_trend(intervals: &[CycleInterval], params: TrendParams) -> Trend {
    if intervals.len() < params.min_intervals {
        return Trend::InsufficientData;
    }

    let Some(slope) = regression_slope(&recent_lengths(intervals, params.window)) else {
        return Trend::Stable;
    };

    if slope > params.slope_threshold {
        Trend::Lengthening
    } else if slope < -params.slope_threshold {
        Trend::Shortening
    } else {
        Trend::Stable
    }
}

/// Ordinary least-squares slope of `values` against `0..n`.
///
/// Returns `None` when `x` has zero variance (fewer than two points).
pub fn regression_slope(values: &[i64]) -> Option<f64> {
    let n = values.len();
    let x_mean = (n as f64 - 1.0) / 2.0;
    let denominator: f64 = (0..n).map(|i| (i as f64 - x_mean).powi(2)).sum();
    if denominator == 0.0 {
        return None;
    }

    let y_mean = values.iter().sum::<i64>() as f64 / n as f64;
    let numerator: f64 = values
        .iter()
        .enumerate()
        .map(|(i, y)| (i as f64 - x_mean) * (*y as f64 - y_mean))
        .sum();

    Some(numerator / denominator)
}
