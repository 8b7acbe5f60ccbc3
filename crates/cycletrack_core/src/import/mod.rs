//! Bulk import of historical cycle starts.
//!
//! # Responsibility
//! - Parse legacy flat files of start dates.
//! - Feed parsed dates to the store without overwriting existing notes.

pub mod flat_file;
