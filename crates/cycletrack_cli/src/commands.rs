//! Subcommand handlers.
//!
//! # Responsibility
//! - Open the store, run one core use-case, print its result.
//! - Keep all terminal text layout in one place.

use crate::cli::{AddArgs, HistoryArgs, ImportArgs, StatusArgs, TodayArgs};
use crate::config::AppConfig;
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use cycletrack_core::db::open_db;
use cycletrack_core::{
    CycleEvent, CycleHistory, CycleService, LengthMarker, RecentStats, SqliteCycleEventRepository,
};

type Service<'conn> = CycleService<SqliteCycleEventRepository<'conn>>;

pub fn import(config: &AppConfig, args: ImportArgs) -> Result<()> {
    with_service(config, |service| {
        let report = service
            .import_flat_file(&args.path)
            .with_context(|| format!("import from {} failed", args.path.display()))?;

        for skipped in &report.skipped {
            println!(
                "  Skipping {} (line {}): {:?}",
                skipped.reason, skipped.line_number, skipped.content
            );
        }
        println!(
            "Imported {} entries from {} ({} new)",
            report.parsed,
            args.path.display(),
            report.inserted
        );
        println!(
            "Total entries: {}, completed cycles: {}",
            report.total_events, report.completed_cycles
        );
        Ok(())
    })
}

pub fn add(config: &AppConfig, args: AddArgs) -> Result<()> {
    record(config, args.date, args.note)
}

pub fn today(config: &AppConfig, args: TodayArgs) -> Result<()> {
    record(config, local_today(), args.note)
}

pub fn status(config: &AppConfig, args: StatusArgs) -> Result<()> {
    let query_date = args.date.unwrap_or_else(local_today);

    with_service(config, |service| {
        let Some(status) = service.status(query_date)? else {
            if args.json {
                println!("null");
            } else {
                println!("No cycle data found. Import with: cycletrack import <path>");
            }
            return Ok(());
        };

        if args.json {
            println!("{}", serde_json::to_string_pretty(&status)?);
            return Ok(());
        }

        println!("{}", cycletrack_core::build_cycle_summary(&status));
        println!();
        if let Some(stats) = service.recent_stats()? {
            print_recent_stats(&stats);
        }
        Ok(())
    })
}

pub fn history(config: &AppConfig, args: HistoryArgs) -> Result<()> {
    with_service(config, |service| {
        let history = service.history(args.count, local_today())?;
        print_history(&history);
        Ok(())
    })
}

fn record(config: &AppConfig, date: NaiveDate, note: Option<String>) -> Result<()> {
    with_service(config, |service| {
        let event = service
            .record_start(date, note)
            .with_context(|| format!("failed to record cycle start {date}"))?;
        println!("{}", recorded_line(&event));
        Ok(())
    })
}

fn with_service<T>(config: &AppConfig, run: impl FnOnce(&Service<'_>) -> Result<T>) -> Result<T> {
    let path = &config.database.path;
    let conn = open_db(path).with_context(|| format!("failed to open {}", path.display()))?;
    let repo = SqliteCycleEventRepository::try_new(&conn)?;
    let service = CycleService::with_config(repo, config.analytics.clone());
    run(&service)
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

fn recorded_line(event: &CycleEvent) -> String {
    match event.note.as_deref() {
        Some(note) => format!("Recorded period start: {} ({note})", event.date),
        None => format!("Recorded period start: {}", event.date),
    }
}

fn print_recent_stats(stats: &RecentStats) {
    println!(
        "Recent {} avg: {:.1} days (range {}-{})",
        stats.window, stats.average, stats.min, stats.max
    );
    println!("Total tracked: {} cycles", stats.total_cycles);
}

fn print_history(history: &CycleHistory) {
    let Some(average) = history.average_length else {
        println!("No completed cycles found.");
        return;
    };

    println!(
        "Last {} cycles (avg {average:.1} days):\n",
        history.entries.len()
    );
    for entry in &history.entries {
        let marker = match entry.marker {
            Some(LengthMarker::Short) => " << short",
            Some(LengthMarker::Long) => " >> long",
            None => "",
        };
        println!("  {}  {:2} days{marker}", entry.start_date, entry.length_days);
    }

    if let Some(current) = history.current {
        println!("\n  {}  day {} (current)", current.start_date, current.day);
    }
}

#[cfg(test)]
mod tests {
    use super::recorded_line;
    use chrono::NaiveDate;
    use cycletrack_core::CycleEvent;

    #[test]
    fn recorded_line_mentions_note_only_when_present() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 15).unwrap();
        assert_eq!(
            recorded_line(&CycleEvent::new(date, None::<String>)),
            "Recorded period start: 2026-02-15"
        );
        assert_eq!(
            recorded_line(&CycleEvent::new(date, Some("short"))),
            "Recorded period start: 2026-02-15 (short)"
        );
    }
}
