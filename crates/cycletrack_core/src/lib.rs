//! Core cycle tracking logic.
//! This crate owns the event store contract and the cycle analytics engine.

pub mod analytics;
pub mod config;
pub mod db;
pub mod import;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use analytics::forecast::forecast_length;
pub use analytics::intervals::{derive_intervals, CycleInterval};
pub use analytics::phase::Phase;
pub use analytics::status::{resolve_status, CycleAnomaly, CycleStatus, LengthRange};
pub use analytics::trend::{classify_trend, Trend, TrendParams};
pub use config::{AnalyticsConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::event::{CycleEvent, EventValidationError};
pub use model::snapshot::EventSnapshot;
pub use repo::event_repo::{
    CycleEventRepository, RepoError, RepoResult, SqliteCycleEventRepository,
};
pub use service::cycle_service::{CycleService, ImportError, ImportReport};
pub use service::history::{CycleHistory, HistoryEntry, LengthMarker, RecentStats};
pub use service::summary::build_cycle_summary;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
