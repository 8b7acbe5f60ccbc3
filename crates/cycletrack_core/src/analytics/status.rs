//! Cycle status resolution for a query date.
//!
//! # Responsibility
//! - Locate the cycle containing the query date and compute its day/phase.
//! - Combine forecast, trend, recent range and anomaly checks into one record.
//!
//! # Invariants
//! - `cycle_day >= 1` for every returned status.
//! - Intervals, forecast, range and trend use the whole snapshot, including
//!   events recorded after the query date.
//! - At most one anomaly is reported; "running long" takes priority.

use crate::analytics::forecast::forecast_length;
use crate::analytics::intervals::{derive_intervals, recent_lengths, CycleInterval};
use crate::analytics::phase::Phase;
use crate::analytics::trend::{classify_trend, Trend, TrendParams};
use crate::config::AnalyticsConfig;
use crate::model::snapshot::EventSnapshot;
use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Minimum and maximum of a set of cycle lengths, in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthRange {
    pub min: i64,
    pub max: i64,
}

impl LengthRange {
    /// Returns `None` for an empty slice.
    pub fn of(lengths: &[i64]) -> Option<Self> {
        let min = *lengths.iter().min()?;
        let max = *lengths.iter().max()?;
        Some(Self { min, max })
    }
}

/// Deviation of the current cycle or the forecast from recent norms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CycleAnomaly {
    /// Current cycle has passed the forecast by more than the margin.
    RunningLong { cycle_day: i64, expected_days: i64 },
    /// Forecast sits well below the shortest recent cycle.
    ShorterThanUsual,
}

impl Display for CycleAnomaly {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RunningLong {
                cycle_day,
                expected_days,
            } => write!(
                f,
                "cycle running long (day {cycle_day} vs ~{expected_days} expected)"
            ),
            Self::ShorterThanUsual => f.write_str("recent cycles shorter than usual"),
        }
    }
}

/// Complete cycle context for one query date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleStatus {
    pub query_date: NaiveDate,
    /// Most recent recorded start on or before `query_date`.
    pub reference_start: NaiveDate,
    /// 1-based day within the current cycle.
    pub cycle_day: i64,
    pub phase: Phase,
    /// Forecast cycle length in days (unrounded).
    pub length_estimate: f64,
    pub predicted_next: NaiveDate,
    pub trend: Trend,
    pub recent_range: Option<LengthRange>,
    pub anomaly: Option<CycleAnomaly>,
    pub note: Option<String>,
    /// Number of completed cycles in the snapshot.
    pub completed_cycles: usize,
}

impl CycleStatus {
    /// Forecast rounded to whole days.
    pub fn rounded_estimate(&self) -> i64 {
        round_days(self.length_estimate)
    }

    /// Forecast rounded half to even at one decimal place, for display.
    pub fn estimate_tenths(&self) -> f64 {
        (self.length_estimate * 10.0).round_ties_even() / 10.0
    }
}

/// Resolves the cycle status on `query_date`.
///
/// Returns `None` when the snapshot is empty or every recorded start lies
/// after `query_date`.
pub fn resolve_status(
    snapshot: &EventSnapshot,
    query_date: NaiveDate,
    config: &AnalyticsConfig,
) -> Option<CycleStatus> {
    let reference_start = snapshot.latest_on_or_before(query_date)?;
    let cycle_day = (query_date - reference_start).num_days() + 1;

    let intervals = derive_intervals(&snapshot.all_dates());
    let length_estimate =
        forecast_length(&intervals, config.forecast_window, config.forecast_decay)
            .unwrap_or(config.default_cycle_length);
    let predicted_next = reference_start
        .checked_add_signed(TimeDelta::days(round_days(length_estimate)))
        .unwrap_or(NaiveDate::MAX);

    let recent_range = LengthRange::of(&recent_lengths(&intervals, config.recent_range_window));
    let trend = classify_trend(&intervals, trend_params(config));
    let anomaly = detect_anomaly(cycle_day, length_estimate, recent_range, config);

    Some(CycleStatus {
        query_date,
        reference_start,
        cycle_day,
        phase: Phase::for_day(cycle_day),
        length_estimate,
        predicted_next,
        trend,
        recent_range,
        anomaly,
        note: snapshot.note_for(reference_start).map(str::to_string),
        completed_cycles: intervals.len(),
    })
}

/// Trend parameters carried by `config`.
pub fn trend_params(config: &AnalyticsConfig) -> TrendParams {
    TrendParams {
        window: config.trend_window,
        min_intervals: config.trend_min_intervals,
        slope_threshold: config.trend_slope_threshold,
    }
}

/// Checks the running cycle first, then the forecast against the recent range.
pub fn detect_anomaly(
    cycle_day: i64,
    length_estimate: f64,
    recent_range: Option<LengthRange>,
    config: &AnalyticsConfig,
) -> Option<CycleAnomaly> {
    if cycle_day as f64 > length_estimate + config.long_cycle_margin_days {
        return Some(CycleAnomaly::RunningLong {
            cycle_day,
            expected_days: round_days(length_estimate),
        });
    }

    match recent_range {
        Some(range) if length_estimate < range.min as f64 - config.short_forecast_margin_days => {
            Some(CycleAnomaly::ShorterThanUsual)
        }
        _ => None,
    }
}

/// Rounds half to even, so 27.5 and 28.5 both become 28.
pub fn round_days(days: f64) -> i64 {
    days.round_ties_even() as i64
}

/// Completed intervals of a snapshot; convenience for history views.
pub fn snapshot_intervals(snapshot: &EventSnapshot) -> Vec<CycleInterval> {
    derive_intervals(&snapshot.all_dates())
}
