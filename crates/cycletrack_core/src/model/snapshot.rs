//! In-memory event store snapshot.
//!
//! # Responsibility
//! - Hold a consistent, point-in-time copy of every recorded start date.
//! - Serve `all_dates` / `note_for` to the analytics engine without I/O.
//!
//! # Invariants
//! - Dates are unique and iterate in ascending order.
//! - Recording an existing date replaces only its note (last write wins).

use crate::model::event::{normalize_note, CycleEvent};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Ordered, date-keyed view over recorded cycle starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventSnapshot {
    events: BTreeMap<NaiveDate, Option<String>>,
}

impl EventSnapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot from dates without notes.
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            events: dates.into_iter().map(|date| (date, None)).collect(),
        }
    }

    /// Records one start date; an existing date gets its note replaced.
    pub fn record(&mut self, date: NaiveDate, note: Option<String>) {
        self.events.insert(date, normalize_note(note));
    }

    /// Ascending, duplicate-free start dates.
    pub fn all_dates(&self) -> Vec<NaiveDate> {
        self.events.keys().copied().collect()
    }

    /// Note attached to `date`, if the date is recorded and annotated.
    pub fn note_for(&self, date: NaiveDate) -> Option<&str> {
        self.events.get(&date).and_then(|note| note.as_deref())
    }

    /// Latest recorded date on or before `date`.
    pub fn latest_on_or_before(&self, date: NaiveDate) -> Option<NaiveDate> {
        self.events.range(..=date).next_back().map(|(day, _)| *day)
    }

    /// Most recent recorded date overall.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.events.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl FromIterator<CycleEvent> for EventSnapshot {
    fn from_iter<T: IntoIterator<Item = CycleEvent>>(iter: T) -> Self {
        let mut snapshot = Self::new();
        for event in iter {
            snapshot.record(event.date, event.note);
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::EventSnapshot;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
    }

    #[test]
    fn dates_are_sorted_and_unique() {
        let snapshot = EventSnapshot::from_dates([d(2026, 2, 25), d(2026, 1, 1), d(2026, 2, 25)]);
        assert_eq!(snapshot.all_dates(), vec![d(2026, 1, 1), d(2026, 2, 25)]);
    }

    #[test]
    fn re_recording_replaces_note_only() {
        let mut snapshot = EventSnapshot::new();
        snapshot.record(d(2026, 1, 1), Some("first".to_string()));
        snapshot.record(d(2026, 1, 29), None);
        let dates_before = snapshot.all_dates();

        snapshot.record(d(2026, 1, 1), Some("edited".to_string()));

        assert_eq!(snapshot.all_dates(), dates_before);
        assert_eq!(snapshot.note_for(d(2026, 1, 1)), Some("edited"));
        assert_eq!(snapshot.note_for(d(2026, 1, 29)), None);
    }

    #[test]
    fn latest_on_or_before_is_inclusive() {
        let snapshot = EventSnapshot::from_dates([d(2026, 1, 1), d(2026, 1, 29)]);
        assert_eq!(snapshot.latest_on_or_before(d(2026, 1, 29)), Some(d(2026, 1, 29)));
        assert_eq!(snapshot.latest_on_or_before(d(2026, 1, 28)), Some(d(2026, 1, 1)));
        assert_eq!(snapshot.latest_on_or_before(d(2025, 12, 31)), None);
    }
}
