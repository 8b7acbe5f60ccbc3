//! Tunable parameters of the cycle analytics engine.
//!
//! # Responsibility
//! - Carry every numeric knob (windows, decay, thresholds, fallback length)
//!   as explicit configuration instead of literals inside the algorithms.
//! - Validate values loaded from files or the environment.
//!
//! # Invariants
//! - `AnalyticsConfig::default()` reproduces the reference behavior:
//!   28-day fallback, 8-cycle forecast window with 0.7 decay, 10-cycle trend
//!   window gated at 4 cycles and +/-0.3 days per cycle.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_CYCLE_LENGTH_DAYS: f64 = 28.0;
pub const DEFAULT_FORECAST_WINDOW: usize = 8;
pub const DEFAULT_FORECAST_DECAY: f64 = 0.7;
pub const DEFAULT_TREND_WINDOW: usize = 10;
pub const DEFAULT_TREND_MIN_INTERVALS: usize = 4;
pub const DEFAULT_TREND_SLOPE_THRESHOLD: f64 = 0.3;
pub const DEFAULT_RECENT_RANGE_WINDOW: usize = 5;

/// Analytics parameters shared by the forecaster, trend classifier and
/// status resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Length assumed when no completed cycle exists yet.
    pub default_cycle_length: f64,
    /// Number of most recent cycles fed to the forecaster.
    pub forecast_window: usize,
    /// Geometric weight ratio between adjacent cycles, in `(0, 1]`.
    pub forecast_decay: f64,
    /// Number of most recent cycles fed to the regression.
    pub trend_window: usize,
    /// Minimum completed cycles before a trend is reported.
    pub trend_min_intervals: usize,
    /// Slope (days per cycle) beyond which a trend is reported.
    pub trend_slope_threshold: f64,
    /// Number of most recent cycles in the reported min/max range.
    pub recent_range_window: usize,
    /// Days past the forecast before a cycle is flagged as running long.
    pub long_cycle_margin_days: f64,
    /// Days below the recent minimum before a forecast is flagged as short.
    pub short_forecast_margin_days: f64,
    /// Distance from the overall average that marks a history entry short/long.
    pub history_marker_margin_days: f64,
    /// Number of most recent cycles summarized by `recent_stats`.
    pub recent_stats_window: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            default_cycle_length: DEFAULT_CYCLE_LENGTH_DAYS,
            forecast_window: DEFAULT_FORECAST_WINDOW,
            forecast_decay: DEFAULT_FORECAST_DECAY,
            trend_window: DEFAULT_TREND_WINDOW,
            trend_min_intervals: DEFAULT_TREND_MIN_INTERVALS,
            trend_slope_threshold: DEFAULT_TREND_SLOPE_THRESHOLD,
            recent_range_window: DEFAULT_RECENT_RANGE_WINDOW,
            long_cycle_margin_days: 5.0,
            short_forecast_margin_days: 3.0,
            history_marker_margin_days: 4.0,
            recent_stats_window: 10,
        }
    }
}

/// Rejected analytics configuration values.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonPositiveDefaultLength(f64),
    InvalidDecay(f64),
    ZeroWindow(&'static str),
    NegativeValue { field: &'static str, value: f64 },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveDefaultLength(value) => {
                write!(f, "default_cycle_length must be positive, got {value}")
            }
            Self::InvalidDecay(value) => {
                write!(f, "forecast_decay must be in (0, 1], got {value}")
            }
            Self::ZeroWindow(field) => write!(f, "{field} must be at least 1"),
            Self::NegativeValue { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl AnalyticsConfig {
    /// Checks that every parameter is within its meaningful domain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.default_cycle_length.is_finite() && self.default_cycle_length > 0.0) {
            return Err(ConfigError::NonPositiveDefaultLength(
                self.default_cycle_length,
            ));
        }
        if !(self.forecast_decay > 0.0 && self.forecast_decay <= 1.0) {
            return Err(ConfigError::InvalidDecay(self.forecast_decay));
        }

        for (field, window) in [
            ("forecast_window", self.forecast_window),
            ("trend_window", self.trend_window),
            ("recent_range_window", self.recent_range_window),
            ("recent_stats_window", self.recent_stats_window),
        ] {
            if window == 0 {
                return Err(ConfigError::ZeroWindow(field));
            }
        }

        for (field, value) in [
            ("trend_slope_threshold", self.trend_slope_threshold),
            ("long_cycle_margin_days", self.long_cycle_margin_days),
            ("short_forecast_margin_days", self.short_forecast_margin_days),
            ("history_marker_margin_days", self.history_marker_margin_days),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::NegativeValue { field, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{AnalyticsConfig, ConfigError};

    #[test]
    fn default_config_is_valid() {
        assert!(AnalyticsConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_decay_outside_unit_interval() {
        let config = AnalyticsConfig {
            forecast_decay: 1.5,
            ..AnalyticsConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidDecay(1.5)));
    }

    #[test]
    fn rejects_zero_windows() {
        let config = AnalyticsConfig {
            trend_window: 0,
            ..AnalyticsConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroWindow("trend_window"))
        );
    }

    #[test]
    fn rejects_non_positive_default_length() {
        let config = AnalyticsConfig {
            default_cycle_length: 0.0,
            ..AnalyticsConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveDefaultLength(_))
        ));
    }
}
