//! Cycle tracking use-case service.
//!
//! # Responsibility
//! - Record and import cycle starts through the repository.
//! - Take one store snapshot per read use-case and run analytics on it.
//!
//! # Invariants
//! - Analytics never see partially written data: reads go through
//!   `CycleEventRepository::snapshot()`.
//! - Note text is never written to logs.

use crate::analytics::status::{resolve_status, snapshot_intervals, CycleStatus};
use crate::config::AnalyticsConfig;
use crate::import::flat_file::{parse_flat_dates, SkippedLine};
use crate::model::event::CycleEvent;
use crate::repo::event_repo::{CycleEventRepository, RepoError, RepoResult};
use crate::service::history::{build_history, recent_stats, CycleHistory, RecentStats};
use crate::service::summary::build_cycle_summary;
use chrono::{NaiveDate, Utc};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Failure while importing a flat date file.
#[derive(Debug)]
pub enum ImportError {
    Io { path: PathBuf, source: std::io::Error },
    Repo(RepoError),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read `{}`: {source}", path.display())
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ImportError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Outcome of a flat-file import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    /// Valid date lines read from the source.
    pub parsed: usize,
    /// Dates that were not stored before.
    pub inserted: usize,
    pub skipped: Vec<SkippedLine>,
    /// Events stored after the import.
    pub total_events: usize,
    /// Completed cycles derivable after the import.
    pub completed_cycles: usize,
}

/// Use-case service over a cycle event repository.
pub struct CycleService<R: CycleEventRepository> {
    repo: R,
    config: AnalyticsConfig,
}

impl<R: CycleEventRepository> CycleService<R> {
    /// Creates a service with default analytics parameters.
    pub fn new(repo: R) -> Self {
        Self::with_config(repo, AnalyticsConfig::default())
    }

    pub fn with_config(repo: R, config: AnalyticsConfig) -> Self {
        Self { repo, config }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Records a cycle start, replacing any note already stored for `date`.
    pub fn record_start(&self, date: NaiveDate, note: Option<String>) -> RepoResult<CycleEvent> {
        let event = CycleEvent::new(date, note);
        match self.repo.record_event(&event) {
            Ok(()) => {
                info!(
                    "event=cycle_record module=service status=ok date={} has_note={}",
                    event.date,
                    event.note.is_some()
                );
                Ok(event)
            }
            Err(err) => {
                warn!(
                    "event=cycle_record module=service status=error date={} error={}",
                    event.date, err
                );
                Err(err)
            }
        }
    }

    /// Imports a flat date file; existing dates keep their notes.
    pub fn import_flat_file(&self, path: impl AsRef<Path>) -> Result<ImportReport, ImportError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.import_flat_text(&contents)?)
    }

    /// Imports flat date list contents already in memory.
    pub fn import_flat_text(&self, contents: &str) -> RepoResult<ImportReport> {
        let started_at = Instant::now();
        let parsed = parse_flat_dates(contents);
        for skipped in &parsed.skipped {
            warn!(
                "event=cycle_import_skip module=service line={} reason={}",
                skipped.line_number, skipped.reason
            );
        }

        let recorded_at = Utc::now();
        let events: Vec<CycleEvent> = parsed
            .dates
            .iter()
            .map(|date| CycleEvent::with_recorded_at(*date, None::<String>, recorded_at))
            .collect();
        let inserted = self.repo.insert_missing(&events)?;

        let snapshot = self.repo.snapshot()?;
        let report = ImportReport {
            parsed: parsed.dates.len(),
            inserted,
            skipped: parsed.skipped,
            total_events: snapshot.len(),
            completed_cycles: snapshot.len().saturating_sub(1),
        };

        info!(
            "event=cycle_import module=service status=ok duration_ms={} parsed={} inserted={} skipped={}",
            started_at.elapsed().as_millis(),
            report.parsed,
            report.inserted,
            report.skipped.len()
        );
        Ok(report)
    }

    /// Resolves the cycle status for `query_date`.
    ///
    /// `Ok(None)` means no cycle context exists for that date.
    pub fn status(&self, query_date: NaiveDate) -> RepoResult<Option<CycleStatus>> {
        let snapshot = self.repo.snapshot()?;
        let status = resolve_status(&snapshot, query_date, &self.config);

        match &status {
            Some(status) => info!(
                "event=cycle_status module=service status=ok cycle_day={} completed_cycles={} trend={} anomaly={}",
                status.cycle_day,
                status.completed_cycles,
                status.trend,
                status.anomaly.is_some()
            ),
            None => info!(
                "event=cycle_status module=service status=empty events={}",
                snapshot.len()
            ),
        }

        Ok(status)
    }

    /// Summary block for `query_date`, or `None` without cycle context.
    pub fn summary(&self, query_date: NaiveDate) -> RepoResult<Option<String>> {
        Ok(self.status(query_date)?.as_ref().map(build_cycle_summary))
    }

    /// Statistics over the configured recent window of completed cycles.
    pub fn recent_stats(&self) -> RepoResult<Option<RecentStats>> {
        let snapshot = self.repo.snapshot()?;
        Ok(recent_stats(
            &snapshot_intervals(&snapshot),
            self.config.recent_stats_window,
        ))
    }

    /// Last `count` completed cycles plus the cycle running on `today`.
    pub fn history(&self, count: usize, today: NaiveDate) -> RepoResult<CycleHistory> {
        let snapshot = self.repo.snapshot()?;
        Ok(build_history(
            &snapshot_intervals(&snapshot),
            snapshot.last_date(),
            count,
            today,
            self.config.history_marker_margin_days,
        ))
    }
}
