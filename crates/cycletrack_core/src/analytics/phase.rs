//! Cycle day to phase mapping.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Named sub-range of cycle days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Menstrual,
    Follicular,
    Ovulatory,
    Luteal,
}

/// Inclusive upper bounds, ascending. The final bucket also absorbs every
/// day past its bound (see [`Phase::for_day`]).
const PHASE_BOUNDS: [(i64, Phase); 4] = [
    (5, Phase::Menstrual),
    (13, Phase::Follicular),
    (16, Phase::Ovulatory),
    (99, Phase::Luteal),
];

impl Phase {
    /// Maps a 1-based cycle day to its phase.
    ///
    /// Days beyond the last bound stay in [`Phase::Luteal`]; there is no
    /// separate label for very long cycles. Callers guarantee `cycle_day >= 1`.
    pub fn for_day(cycle_day: i64) -> Self {
        PHASE_BOUNDS
            .iter()
            .find(|(upper, _)| cycle_day <= *upper)
            .map_or(Self::open_tail(), |(_, phase)| *phase)
    }

    /// Phase reported for every day past the final bound.
    pub const fn open_tail() -> Self {
        PHASE_BOUNDS[PHASE_BOUNDS.len() - 1].1
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Menstrual => "Menstrual",
            Self::Follicular => "Follicular",
            Self::Ovulatory => "Ovulatory",
            Self::Luteal => "Luteal",
        }
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Phase;

    #[test]
    fn boundaries_are_inclusive() {
        assert_eq!(Phase::for_day(1), Phase::Menstrual);
        assert_eq!(Phase::for_day(5), Phase::Menstrual);
        assert_eq!(Phase::for_day(6), Phase::Follicular);
        assert_eq!(Phase::for_day(13), Phase::Follicular);
        assert_eq!(Phase::for_day(14), Phase::Ovulatory);
        assert_eq!(Phase::for_day(16), Phase::Ovulatory);
        assert_eq!(Phase::for_day(17), Phase::Luteal);
        assert_eq!(Phase::for_day(99), Phase::Luteal);
    }

    #[test]
    fn days_past_the_last_bound_stay_luteal() {
        assert_eq!(Phase::for_day(100), Phase::Luteal);
        assert_eq!(Phase::for_day(150), Phase::Luteal);
        assert_eq!(Phase::for_day(i64::MAX), Phase::Luteal);
        assert_eq!(Phase::open_tail(), Phase::Luteal);
    }

    #[test]
    fn display_uses_capitalized_names() {
        assert_eq!(Phase::Ovulatory.to_string(), "Ovulatory");
    }
}
