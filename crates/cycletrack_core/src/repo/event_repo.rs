//! Cycle event repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist cycle starts in `cycle_starts` with last-write-wins per date.
//! - Hand the analytics engine a consistent [`EventSnapshot`].
//!
//! # Invariants
//! - Write paths call `CycleEvent::validate()` before SQL mutations.
//! - Read paths reject rows whose date or timestamp cannot be parsed.
//! - `snapshot()` reads inside one transaction.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::event::{CycleEvent, EventValidationError};
use crate::model::snapshot::EventSnapshot;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const EVENT_SELECT_SQL: &str = "SELECT
    date,
    notes,
    created_at
FROM cycle_starts";

const DATE_FORMAT: &str = "%Y-%m-%d";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for cycle event persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Validation(EventValidationError),
    Db(DbError),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted cycle data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is not {expected_version}; open it with `open_db`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) | Self::UninitializedConnection { .. } => None,
        }
    }
}

impl From<EventValidationError> for RepoError {
    fn from(value: EventValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the cycle event store.
pub trait CycleEventRepository {
    /// Inserts or replaces the event for its date.
    fn record_event(&self, event: &CycleEvent) -> RepoResult<()>;
    /// Inserts the events whose dates are not stored yet, in one transaction.
    ///
    /// Returns how many rows were actually inserted.
    fn insert_missing(&self, events: &[CycleEvent]) -> RepoResult<usize>;
    fn get_event(&self, date: NaiveDate) -> RepoResult<Option<CycleEvent>>;
    /// All events, ascending by date.
    fn list_events(&self) -> RepoResult<Vec<CycleEvent>>;
    /// All recorded dates, ascending and unique.
    fn all_dates(&self) -> RepoResult<Vec<NaiveDate>>;
    fn note_for(&self, date: NaiveDate) -> RepoResult<Option<String>>;
    /// Consistent in-memory copy of every event.
    fn snapshot(&self) -> RepoResult<EventSnapshot>;
}

/// SQLite-backed cycle event repository.
pub struct SqliteCycleEventRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCycleEventRepository<'conn> {
    /// Wraps a connection returned by `open_db` / `open_db_in_memory`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version =
            conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        Ok(Self { conn })
    }

    fn query_events(&self, conn: &Connection) -> RepoResult<Vec<CycleEvent>> {
        let mut stmt = conn.prepare(&format!("{EVENT_SELECT_SQL} ORDER BY date ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut events = Vec::new();

        while let Some(row) = rows.next()? {
            events.push(parse_event_row(row)?);
        }

        Ok(events)
    }
}

impl CycleEventRepository for SqliteCycleEventRepository<'_> {
    fn record_event(&self, event: &CycleEvent) -> RepoResult<()> {
        event.validate()?;

        self.conn.execute(
            "INSERT OR REPLACE INTO cycle_starts (date, notes, created_at)
             VALUES (?1, ?2, ?3);",
            params![
                date_to_db(event.date),
                event.note.as_deref(),
                timestamp_to_db(event.recorded_at),
            ],
        )?;

        Ok(())
    }

    fn insert_missing(&self, events: &[CycleEvent]) -> RepoResult<usize> {
        for event in events {
            event.validate()?;
        }

        let tx = self.conn.unchecked_transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO cycle_starts (date, notes, created_at)
                 VALUES (?1, ?2, ?3);",
            )?;
            for event in events {
                inserted += stmt.execute(params![
                    date_to_db(event.date),
                    event.note.as_deref(),
                    timestamp_to_db(event.recorded_at),
                ])?;
            }
        }
        tx.commit()?;

        Ok(inserted)
    }

    fn get_event(&self, date: NaiveDate) -> RepoResult<Option<CycleEvent>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EVENT_SELECT_SQL} WHERE date = ?1;"))?;

        let mut rows = stmt.query([date_to_db(date)])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_event_row(row)?));
        }

        Ok(None)
    }

    fn list_events(&self) -> RepoResult<Vec<CycleEvent>> {
        self.query_events(self.conn)
    }

    fn all_dates(&self) -> RepoResult<Vec<NaiveDate>> {
        let mut stmt = self
            .conn
            .prepare("SELECT date FROM cycle_starts ORDER BY date ASC;")?;
        let mut rows = stmt.query([])?;
        let mut dates = Vec::new();

        while let Some(row) = rows.next()? {
            let text: String = row.get(0)?;
            dates.push(parse_date(&text)?);
        }

        Ok(dates)
    }

    fn note_for(&self, date: NaiveDate) -> RepoResult<Option<String>> {
        let note = self
            .conn
            .query_row(
                "SELECT notes FROM cycle_starts WHERE date = ?1;",
                [date_to_db(date)],
                |row| row.get::<_, Option<String>>(0),
            )
            .optional()?
            .flatten()
            .filter(|note| !note.is_empty());

        Ok(note)
    }

    fn snapshot(&self) -> RepoResult<EventSnapshot> {
        let tx = self.conn.unchecked_transaction()?;
        let events = self.query_events(&tx)?;
        tx.commit()?;

        Ok(events.into_iter().collect())
    }
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<CycleEvent> {
    let date_text: String = row.get("date")?;
    let date = parse_date(&date_text)?;

    let created_text: String = row.get("created_at")?;
    let recorded_at = parse_timestamp(&created_text)?;

    Ok(CycleEvent::with_recorded_at(
        date,
        row.get::<_, Option<String>>("notes")?,
        recorded_at,
    ))
}

fn parse_date(value: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!("invalid date `{value}` in cycle_starts.date"))
    })
}

/// Accepts RFC 3339 as written by this crate, and naive ISO timestamps
/// (interpreted as UTC) as found in databases created by earlier tooling.
fn parse_timestamp(value: &str) -> RepoResult<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    value
        .parse::<chrono::NaiveDateTime>()
        .map(|naive| naive.and_utc())
        .map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid timestamp `{value}` in cycle_starts.created_at"
            ))
        })
}

fn date_to_db(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn timestamp_to_db(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}
