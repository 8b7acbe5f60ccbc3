//! Command-line surface.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "cycletrack", version, about = "Cycle start tracking and forecasting")]
pub struct Cli {
    /// SQLite database path (overrides configuration)
    #[arg(long, global = true, env = "CYCLETRACK_DB")]
    pub db: Option<PathBuf>,

    /// YAML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Import start dates from a flat file (`dd. mm. yyyy` per line)
    Import(ImportArgs),
    /// Record a cycle start
    Add(AddArgs),
    /// Record a cycle start for today
    Today(TodayArgs),
    /// Current cycle day, phase and prediction
    Status(StatusArgs),
    /// Recent completed cycles
    History(HistoryArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to the flat date file
    pub path: PathBuf,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Start date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Optional note
    pub note: Option<String>,
}

#[derive(Debug, Args)]
pub struct TodayArgs {
    /// Optional note
    pub note: Option<String>,
}

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Query date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Print the status record as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Number of cycles to show
    #[arg(short = 'n', long = "count", default_value_t = 20)]
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands};
    use chrono::NaiveDate;
    use clap::{CommandFactory, Parser};

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_add_with_note() {
        let cli = Cli::parse_from(["cycletrack", "add", "2026-02-15", "short, stress-induced"]);
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.date, NaiveDate::from_ymd_opt(2026, 2, 15).unwrap());
                assert_eq!(args.note.as_deref(), Some("short, stress-induced"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn history_count_defaults_to_twenty() {
        let cli = Cli::parse_from(["cycletrack", "history"]);
        assert!(matches!(cli.command, Commands::History(args) if args.count == 20));

        let cli = Cli::parse_from(["cycletrack", "history", "-n", "5"]);
        assert!(matches!(cli.command, Commands::History(args) if args.count == 5));
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(Cli::try_parse_from(["cycletrack", "add", "15.02.2026"]).is_err());
    }
}
