//! Cycle history and recent-window statistics.

use crate::analytics::intervals::{recent_lengths, CycleInterval};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Marker for a cycle far from the overall average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthMarker {
    Short,
    Long,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub start_date: NaiveDate,
    pub length_days: i64,
    pub marker: Option<LengthMarker>,
}

/// The incomplete cycle started by the latest recorded date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentCycle {
    pub start_date: NaiveDate,
    pub day: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleHistory {
    /// Mean length over every completed cycle, not just the listed ones.
    /// `None` when no cycle is complete.
    pub average_length: Option<f64>,
    /// Most recent completed cycles, oldest first.
    pub entries: Vec<HistoryEntry>,
    pub current: Option<CurrentCycle>,
}

/// Summary of the last few completed cycles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecentStats {
    /// Number of cycles averaged (at most the requested window).
    pub window: usize,
    pub average: f64,
    pub min: i64,
    pub max: i64,
    /// Completed cycles in the whole history.
    pub total_cycles: usize,
}

/// Builds the last `count` history entries plus the current cycle.
///
/// Entries shorter than `average - margin_days` are marked short, longer than
/// `average + margin_days` long.
pub fn build_history(
    intervals: &[CycleInterval],
    last_start: Option<NaiveDate>,
    count: usize,
    today: NaiveDate,
    margin_days: f64,
) -> CycleHistory {
    let all_lengths: Vec<i64> = intervals.iter().map(|interval| interval.length_days).collect();
    let average_length = mean(&all_lengths);
    let start = intervals.len().saturating_sub(count);

    let entries = intervals[start..]
        .iter()
        .map(|interval| HistoryEntry {
            start_date: interval.start_date,
            length_days: interval.length_days,
            marker: average_length
                .and_then(|average| length_marker(interval.length_days, average, margin_days)),
        })
        .collect();

    let current = last_start.map(|start_date| CurrentCycle {
        start_date,
        day: (today - start_date).num_days() + 1,
    });

    CycleHistory {
        average_length,
        entries,
        current,
    }
}

/// Average, min and max over the last `window` completed cycles.
pub fn recent_stats(intervals: &[CycleInterval], window: usize) -> Option<RecentStats> {
    let lengths = recent_lengths(intervals, window);
    let average = mean(&lengths)?;

    Some(RecentStats {
        window: lengths.len(),
        average,
        min: *lengths.iter().min()?,
        max: *lengths.iter().max()?,
        total_cycles: intervals.len(),
    })
}

fn length_marker(length_days: i64, average: f64, margin_days: f64) -> Option<LengthMarker> {
    let length = length_days as f64;
    if length < average - margin_days {
        Some(LengthMarker::Short)
    } else if length > average + margin_days {
        Some(LengthMarker::Long)
    } else {
        None
    }
}

fn mean(values: &[i64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<i64>() as f64 / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::{build_history, recent_stats, LengthMarker};
    use crate::analytics::intervals::{derive_intervals, CycleInterval};
    use chrono::{Days, NaiveDate};

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date")
    }

    fn intervals_from_lengths(lengths: &[u64]) -> Vec<CycleInterval> {
        let mut day = start();
        let mut dates = vec![day];
        for length in lengths {
            day = day + Days::new(*length);
            dates.push(day);
        }
        derive_intervals(&dates)
    }

    #[test]
    fn marks_outliers_against_overall_average() {
        let intervals = intervals_from_lengths(&[28, 28, 20, 28, 36]);
        let history = build_history(&intervals, None, 20, start(), 4.0);

        assert_eq!(history.average_length, Some(28.0));
        let markers: Vec<Option<LengthMarker>> =
            history.entries.iter().map(|entry| entry.marker).collect();
        assert_eq!(
            markers,
            vec![
                None,
                None,
                Some(LengthMarker::Short),
                None,
                Some(LengthMarker::Long),
            ]
        );
    }

    #[test]
    fn limits_entries_but_averages_everything() {
        let intervals = intervals_from_lengths(&[40, 28, 28]);
        let history = build_history(&intervals, None, 2, start(), 4.0);
        assert_eq!(history.entries.len(), 2);
        assert_eq!(history.average_length, Some(32.0));
        assert_eq!(history.entries[0].marker, None);
    }

    #[test]
    fn reports_current_cycle_day() {
        let last = NaiveDate::from_ymd_opt(2026, 2, 25).expect("valid date");
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).expect("valid date");
        let history = build_history(&[], Some(last), 20, today, 4.0);
        assert!(history.entries.is_empty());
        assert_eq!(history.average_length, None);
        assert_eq!(history.current.map(|current| current.day), Some(14));
    }

    #[test]
    fn recent_stats_cover_the_window() {
        let intervals = intervals_from_lengths(&[40, 26, 28, 29]);
        let stats = recent_stats(&intervals, 3).expect("stats");
        assert_eq!(stats.window, 3);
        assert_eq!(stats.min, 26);
        assert_eq!(stats.max, 29);
        assert!((stats.average - 27.6667).abs() < 1e-3);
        assert_eq!(stats.total_cycles, 4);
        assert!(recent_stats(&[], 10).is_none());
    }
}
