//! Domain model for recorded cycle starts.
//!
//! # Responsibility
//! - Define the canonical event record persisted by the store.
//! - Provide the in-memory snapshot consumed by the analytics engine.
//!
//! # Invariants
//! - Every event is keyed by its calendar date; one event per date.
//! - Events are never deleted by core code; re-recording replaces the note.

pub mod event;
pub mod snapshot;
