//! Flat-file date list parser (`dd. mm. yyyy`, one date per line).
//!
//! # Invariants
//! - Blank lines are ignored silently.
//! - Lines without exactly three `". "`-separated parts are *malformed*.
//! - Parts are trimmed before parsing, so extra spacing is tolerated.
//! - Parts that are not numbers, do not form a calendar date, or fall
//!   outside years 1..=9999 are *invalid*.
//! - Parsing never fails as a whole; bad lines are reported, not fatal.

use crate::model::event::SUPPORTED_YEARS;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};

static DATE_PART_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+$").expect("valid date part regex"));

/// Reason a line was not imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Malformed,
    InvalidDate,
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed => f.write_str("malformed line"),
            Self::InvalidDate => f.write_str("invalid date"),
        }
    }
}

/// One rejected input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the source.
    pub line_number: usize,
    /// Trimmed line content.
    pub content: String,
    pub reason: SkipReason,
}

/// Result of parsing a flat date list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDates {
    /// Valid dates in file order; duplicates are kept.
    pub dates: Vec<NaiveDate>,
    pub skipped: Vec<SkippedLine>,
}

/// Parses the full contents of a flat date list.
pub fn parse_flat_dates(contents: &str) -> ParsedDates {
    let mut parsed = ParsedDates::default();

    for (index, raw_line) in contents.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_line(line) {
            Ok(date) => parsed.dates.push(date),
            Err(reason) => parsed.skipped.push(SkippedLine {
                line_number: index + 1,
                content: line.to_string(),
                reason,
            }),
        }
    }

    parsed
}

fn parse_line(line: &str) -> Result<NaiveDate, SkipReason> {
    let parts: Vec<&str> = line.split(". ").collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(SkipReason::Malformed);
    };

    let day = parse_part::<u32>(day)?;
    let month = parse_part::<u32>(month)?;
    let year = parse_part::<i32>(year)?;
    if !SUPPORTED_YEARS.contains(&year) {
        return Err(SkipReason::InvalidDate);
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or(SkipReason::InvalidDate)
}

fn parse_part<T: std::str::FromStr>(part: &str) -> Result<T, SkipReason> {
    let part = part.trim();
    if !DATE_PART_RE.is_match(part) {
        return Err(SkipReason::InvalidDate);
    }
    part.parse::<T>().map_err(|_| SkipReason::InvalidDate)
}

#[cfg(test)]
mod tests {
    use super::{parse_flat_dates, SkipReason};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
    }

    #[test]
    fn parses_valid_lines_and_ignores_blank_ones() {
        let parsed = parse_flat_dates("1. 1. 2026\n\n29. 1. 2026\n  25. 02. 2026  \n");
        assert_eq!(parsed.dates, vec![d(2026, 1, 1), d(2026, 1, 29), d(2026, 2, 25)]);
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn classifies_rejected_lines() {
        let parsed = parse_flat_dates("2026-01-01\n31. 2. 2026\nab. cd. efgh\n1. 1. 2026");
        assert_eq!(parsed.dates, vec![d(2026, 1, 1)]);

        let reasons: Vec<(usize, SkipReason)> = parsed
            .skipped
            .iter()
            .map(|line| (line.line_number, line.reason))
            .collect();
        assert_eq!(
            reasons,
            vec![
                (1, SkipReason::Malformed),
                (2, SkipReason::InvalidDate),
                (3, SkipReason::InvalidDate),
            ]
        );
    }

    #[test]
    fn keeps_duplicates_for_the_store_to_collapse() {
        let parsed = parse_flat_dates("1. 1. 2026\n1. 1. 2026");
        assert_eq!(parsed.dates.len(), 2);
    }

    #[test]
    fn tolerates_extra_spacing_around_parts() {
        let parsed = parse_flat_dates("1.  2. 2026\n3. 4.  2026");
        assert_eq!(parsed.dates, vec![d(2026, 2, 1), d(2026, 4, 3)]);
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn rejects_years_outside_supported_range() {
        let parsed = parse_flat_dates("25. 2. 20260\n1. 1. 0\n29. 1. 2026");
        assert_eq!(parsed.dates, vec![d(2026, 1, 29)]);

        let reasons: Vec<(usize, SkipReason)> = parsed
            .skipped
            .iter()
            .map(|line| (line.line_number, line.reason))
            .collect();
        assert_eq!(
            reasons,
            vec![(1, SkipReason::InvalidDate), (2, SkipReason::InvalidDate)]
        );
    }
}
