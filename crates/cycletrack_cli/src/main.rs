//! cycletrack CLI entry point.
//!
//! # Responsibility
//! - Parse arguments, load configuration, start logging when configured.
//! - Dispatch to one subcommand handler and report failures on stderr.

mod cli;
mod commands;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use log::error;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        error!("event=cli_command module=cli status=error error={err:#}");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut app_config = config::load(cli.config.as_deref())?;
    if let Some(db) = cli.db {
        app_config.database.path = db;
    }

    if let Some(log_dir) = app_config.logging.dir.as_deref() {
        cycletrack_core::init_logging(&app_config.logging.level, log_dir)
            .map_err(anyhow::Error::msg)
            .context("failed to initialize logging")?;
    }

    match cli.command {
        Commands::Import(args) => commands::import(&app_config, args),
        Commands::Add(args) => commands::add(&app_config, args),
        Commands::Today(args) => commands::today(&app_config, args),
        Commands::Status(args) => commands::status(&app_config, args),
        Commands::History(args) => commands::history(&app_config, args),
    }
}
