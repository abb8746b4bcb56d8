//! `studydesk` command-line front end.
//!
//! # Responsibility
//! - Load config, start logging and open the database.
//! - Hand each subcommand to the core application shell.

mod args;
mod commands;

use anyhow::{Context, Result};
use args::Cli;
use clap::Parser;
use std::sync::Arc;
use studydesk_core::{init_from_config, open_db, AppConfig, AppShell, TerminalNotifier};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(AppConfig::default_config_path);
    let mut config = AppConfig::load_or_create(&config_path)
        .with_context(|| format!("failed to load config `{}`", config_path.display()))?;
    if let Some(db) = cli.db.clone() {
        config.storage.db_path = Some(db);
    }

    // Logging is optional for the CLI; keep going without it.
    if let Err(err) = init_from_config(&config.logging, &config.log_dir()) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let db_path = config.db_path();
    let conn = open_db(&db_path)
        .with_context(|| format!("failed to open database `{}`", db_path.display()))?;
    let mut shell = AppShell::from_config(conn, &config, Arc::new(TerminalNotifier))?;

    commands::dispatch(&mut shell, cli.command).await
}
