//! loomshift library root.
//! Exposes the CLI parser, the high-level run() function and the engine
//! modules (state store, metrics, reports, file sync).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod logging;
pub mod models;
pub mod sync;
pub mod ui;
pub mod utils;

use clap::Parser;
use crate::cli::commands;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::store::Store;
use crate::errors::{AppError, AppResult};
use crate::models::Millis;
use crate::ui::messages::warning;
use crate::utils::time::now_ms;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let view = cli.view.unwrap_or(cfg.default_view);
    commands::ensure_allowed(view, &cli.command)?;

    // commands that do not need the document
    match &cli.command {
        Commands::Init => return commands::init::handle(cli),
        Commands::Config { .. } => return commands::config::handle(&cli.command, cfg),
        Commands::Log { .. } => return commands::log::handle(&cli.command, cfg),
        _ => {}
    }

    let mut store = Store::open_path(&cfg.database, cfg.sync_debounce())?;
    let now = now_ms();

    let result = run_command(&cli.command, &mut store, cfg, now);

    // pending sync writes go out even when the command failed
    match store.flush() {
        Ok(()) => {}
        Err(AppError::SyncFailed(msg)) => {
            tracing::error!(error = %msg, "file sync failed");
            warning(format!("File sync failed ({msg}); the sync has been disconnected."));
        }
        Err(e) if result.is_ok() => return Err(e),
        Err(e) => tracing::error!(error = %e, "file sync flush failed"),
    }

    result
}

fn run_command(cmd: &Commands, store: &mut Store, cfg: &Config, now: Millis) -> AppResult<()> {
    match cmd {
        Commands::Shift { action } => commands::shift::handle(action, store, cfg, now),
        Commands::Reading { action } => commands::readings::handle(action, store, now),
        Commands::Stop { action } => commands::stops::handle(action, store, now),
        Commands::Quality { action } => commands::quality::handle(action, store, now),
        Commands::Ith { action } => commands::ith::handle(action, store, now),

        Commands::Dashboard { loom } => {
            commands::analysis::dashboard(store, cfg, loom.as_deref(), now)
        }
        Commands::Pareto { ith, loom } => {
            commands::analysis::pareto(store, cfg, *ith, loom.as_deref(), now)
        }
        Commands::Hourly { loom } => commands::analysis::hourly(store, cfg, loom),
        Commands::History { action } => commands::history::handle(action, store, cfg),

        Commands::Operator { action } => commands::catalog::operator(action, store, now),
        Commands::Product { action } => commands::catalog::product(action, store, now),
        Commands::Loom { action } => commands::catalog::loom(action, store, now),
        Commands::Reason { action } => commands::catalog::reason(action, store, now),
        Commands::IthReason { action } => commands::catalog::ith_reason(action, store, now),
        Commands::Settings { action } => commands::settings::handle(action, store, cfg, now),

        Commands::Report { action } => commands::report::handle(action, store, now),
        Commands::Export { .. } => commands::export::handle(cmd, store, now),
        Commands::Restore { .. } => commands::backup::restore(cmd, store, now),
        Commands::Backup { .. } => commands::backup::handle(cmd, store),
        Commands::Sync { action } => commands::sync::handle(action, store, now),

        Commands::Init | Commands::Config { .. } | Commands::Log { .. } => Ok(()),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    logging::init(&cfg.log_level);
    tracing::debug!(database = %cfg.database, view = ?cli.view, "starting");

    dispatch(&cli, &cfg)
}
