//! Cycle analytics engine.
//!
//! # Responsibility
//! - Turn an ordered set of start dates into completed cycle intervals.
//! - Forecast the next cycle length, classify the recent trend, map days to
//!   phases, and resolve the full status for a query date.
//!
//! # Invariants
//! - Every function here is pure: no I/O, no shared state, no failure modes.
//! - Insufficient history is expressed as `None` or `Trend::InsufficientData`.

pub mod forecast;
pub mod intervals;
pub mod phase;
pub mod status;
pub mod trend;
