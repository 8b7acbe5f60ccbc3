//! Repository layer for the cycle event store.
//!
//! # Responsibility
//! - Define the event store contract used by services.
//! - Isolate SQLite query details from analytics and orchestration.
//!
//! # Invariants
//! - Repository writes enforce `CycleEvent::validate()` before persistence.
//! - One row per calendar date; later writes replace earlier ones.

pub mod event_repo;
