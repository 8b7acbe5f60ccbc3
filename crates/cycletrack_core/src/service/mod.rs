//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls and analytics into use-case level APIs.
//! - Keep CLI callers decoupled from storage details.

pub mod cycle_service;
pub mod history;
pub mod summary;
