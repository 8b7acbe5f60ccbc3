//! Completed-cycle derivation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One completed cycle: the span between two adjacent recorded starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleInterval {
    pub start_date: NaiveDate,
    pub length_days: i64,
}

/// Derives completed cycles from ascending, duplicate-free start dates.
///
/// `n` dates yield exactly `n - 1` intervals; the last date starts the
/// current, incomplete cycle and never produces one.
pub fn derive_intervals(dates: &[NaiveDate]) -> Vec<CycleInterval> {
    dates
        .windows(2)
        .map(|pair| CycleInterval {
            start_date: pair[0],
            length_days: (pair[1] - pair[0]).num_days(),
        })
        .collect()
}

/// Lengths of the last `window` intervals, oldest first.
pub fn recent_lengths(intervals: &[CycleInterval], window: usize) -> Vec<i64> {
    let start = intervals.len().saturating_sub(window);
    intervals[start..]
        .iter()
        .map(|interval| interval.length_days)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{derive_intervals, recent_lengths, CycleInterval};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
    }

    #[test]
    fn empty_and_single_inputs_yield_no_intervals() {
        assert!(derive_intervals(&[]).is_empty());
        assert!(derive_intervals(&[d(2026, 1, 1)]).is_empty());
    }

    #[test]
    fn yields_one_interval_per_adjacent_pair() {
        let dates = [d(2026, 1, 1), d(2026, 1, 29), d(2026, 2, 25)];
        let intervals = derive_intervals(&dates);
        assert_eq!(
            intervals,
            vec![
                CycleInterval {
                    start_date: d(2026, 1, 1),
                    length_days: 28,
                },
                CycleInterval {
                    start_date: d(2026, 1, 29),
                    length_days: 27,
                },
            ]
        );
    }

    #[test]
    fn lengths_are_positive_for_strictly_increasing_dates() {
        let dates: Vec<NaiveDate> = (0..12)
            .map(|i| d(2024, 1, 1) + chrono::Days::new(i * 29 + (i % 3)))
            .collect();
        let intervals = derive_intervals(&dates);
        assert_eq!(intervals.len(), dates.len() - 1);
        assert!(intervals.iter().all(|interval| interval.length_days > 0));
    }

    #[test]
    fn day_counts_follow_the_calendar_across_leap_day() {
        let intervals = derive_intervals(&[d(2024, 2, 20), d(2024, 3, 19)]);
        assert_eq!(intervals[0].length_days, 28);
    }

    #[test]
    fn recent_lengths_takes_the_tail() {
        let dates = [d(2026, 1, 1), d(2026, 1, 29), d(2026, 2, 25), d(2026, 3, 25)];
        let intervals = derive_intervals(&dates);
        assert_eq!(recent_lengths(&intervals, 2), vec![27, 28]);
        assert_eq!(recent_lengths(&intervals, 10), vec![28, 27, 28]);
    }
}
