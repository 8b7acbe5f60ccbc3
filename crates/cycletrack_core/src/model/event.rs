//! Cycle start event model.
//!
//! # Responsibility
//! - Define the record stored for every period start date.
//! - Normalize and validate free-text notes before persistence.
//!
//! # Invariants
//! - `date` is the unique key; it carries no time-of-day component.
//! - `note` is never `Some("")`: blank notes are normalized to `None`.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;

/// Upper bound on stored note length, counted in characters.
pub const MAX_NOTE_CHARS: usize = 500;

/// Calendar years accepted for stored dates.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1..=9999;

/// Recorded start of one cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleEvent {
    /// Calendar date the cycle started.
    pub date: NaiveDate,
    /// Optional annotation (e.g. "short, stress-induced").
    pub note: Option<String>,
    /// When this row was last written.
    pub recorded_at: DateTime<Utc>,
}

/// Validation failures for [`CycleEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    DateOutOfRange { date: NaiveDate },
    NoteTooLong { chars: usize, max: usize },
    NoteControlCharacter,
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DateOutOfRange { date } => write!(
                f,
                "date {date} is outside years {}..={}",
                SUPPORTED_YEARS.start(),
                SUPPORTED_YEARS.end()
            ),
            Self::NoteTooLong { chars, max } => {
                write!(f, "note has {chars} characters; at most {max} are allowed")
            }
            Self::NoteControlCharacter => write!(f, "note must not contain control characters"),
        }
    }
}

impl Error for EventValidationError {}

impl CycleEvent {
    /// Creates an event stamped with the current time.
    ///
    /// Blank or whitespace-only notes are stored as `None`.
    pub fn new(date: NaiveDate, note: Option<impl Into<String>>) -> Self {
        Self::with_recorded_at(date, note, Utc::now())
    }

    /// Creates an event with a caller-provided write timestamp.
    ///
    /// Used by import paths that stamp a whole batch with one instant.
    pub fn with_recorded_at(
        date: NaiveDate,
        note: Option<impl Into<String>>,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            date,
            note: normalize_note(note.map(Into::into)),
            recorded_at,
        }
    }

    /// Validates the date year and the note against storage limits.
    pub fn validate(&self) -> Result<(), EventValidationError> {
        if !SUPPORTED_YEARS.contains(&self.date.year()) {
            return Err(EventValidationError::DateOutOfRange { date: self.date });
        }

        let Some(note) = self.note.as_deref() else {
            return Ok(());
        };

        let chars = note.chars().count();
        if chars > MAX_NOTE_CHARS {
            return Err(EventValidationError::NoteTooLong {
                chars,
                max: MAX_NOTE_CHARS,
            });
        }
        if note.chars().any(|c| c.is_control() && c != '\t') {
            return Err(EventValidationError::NoteControlCharacter);
        }
        Ok(())
    }
}

/// Trims a note and collapses blank input to `None`.
pub fn normalize_note(note: Option<String>) -> Option<String> {
    note.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{CycleEvent, EventValidationError, MAX_NOTE_CHARS};
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 15).expect("valid date")
    }

    #[test]
    fn blank_notes_are_normalized_to_none() {
        let event = CycleEvent::new(day(), Some("   "));
        assert_eq!(event.note, None);

        let event = CycleEvent::new(day(), Some("  short, stress-induced "));
        assert_eq!(event.note.as_deref(), Some("short, stress-induced"));
    }

    #[test]
    fn validate_rejects_oversized_note() {
        let event = CycleEvent::new(day(), Some("x".repeat(MAX_NOTE_CHARS + 1)));
        assert_eq!(
            event.validate(),
            Err(EventValidationError::NoteTooLong {
                chars: MAX_NOTE_CHARS + 1,
                max: MAX_NOTE_CHARS,
            })
        );
    }

    #[test]
    fn validate_rejects_embedded_newline() {
        let event = CycleEvent::new(day(), Some("line1\nline2"));
        assert_eq!(
            event.validate(),
            Err(EventValidationError::NoteControlCharacter)
        );
    }

    #[test]
    fn validate_accepts_absent_note() {
        let event = CycleEvent::new(day(), None::<String>);
        assert!(event.validate().is_ok());
    }

    #[test]
    fn validate_rejects_years_outside_supported_range() {
        for year in [0, 10000, 20260] {
            let date = NaiveDate::from_ymd_opt(year, 2, 25).expect("chrono accepts year");
            let event = CycleEvent::new(date, None::<String>);
            assert_eq!(
                event.validate(),
                Err(EventValidationError::DateOutOfRange { date })
            );
        }

        let edge = NaiveDate::from_ymd_opt(9999, 12, 31).expect("valid date");
        assert!(CycleEvent::new(edge, None::<String>).validate().is_ok());
    }
}
