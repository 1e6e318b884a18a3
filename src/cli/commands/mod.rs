pub mod analysis;
pub mod backup;
pub mod catalog;
pub mod config;
pub mod export;
pub mod history;
pub mod init;
pub mod ith;
pub mod log;
pub mod quality;
pub mod readings;
pub mod report;
pub mod settings;
pub mod shift;
pub mod stops;
pub mod sync;

use crate::cli::parser::{
    Commands, IthAction, IthReasonAction, LoomAction, OperatorAction, ProductAction,
    QualityAction, ReadingAction, ReasonAction, SettingsAction, ShiftAction, StopAction,
    SyncAction,
};
use crate::config::ViewMode;
use crate::errors::{AppError, AppResult};
use crate::models::catalog::Loom;
use crate::models::state::AppState;

/// Commands that never change the document.
fn is_read_only(cmd: &Commands) -> bool {
    match cmd {
        Commands::Init | Commands::Config { .. } | Commands::Log { .. } => true,
        Commands::Dashboard { .. }
        | Commands::Pareto { .. }
        | Commands::Hourly { .. }
        | Commands::History { .. }
        | Commands::Report { .. }
        | Commands::Export { .. }
        | Commands::Backup { .. } => true,
        Commands::Shift { action } => matches!(action, ShiftAction::Status),
        Commands::Reading { action } => matches!(action, ReadingAction::List { .. }),
        Commands::Stop { action } => matches!(action, StopAction::List { .. }),
        Commands::Quality { action } => matches!(action, QualityAction::List),
        Commands::Ith { action } => matches!(action, IthAction::List { .. }),
        Commands::Operator { action } => matches!(action, OperatorAction::List),
        Commands::Product { action } => matches!(action, ProductAction::List),
        Commands::Loom { action } => matches!(action, LoomAction::List),
        Commands::Reason { action } => matches!(action, ReasonAction::List),
        Commands::IthReason { action } => matches!(action, IthReasonAction::List),
        Commands::Settings { action } => matches!(action, SettingsAction::Show),
        Commands::Sync { action } => matches!(action, SyncAction::Status),
        Commands::Restore { .. } => false,
    }
}

/// Shop-floor recording: readings, stops, quality and ITH.
fn is_floor_recording(cmd: &Commands) -> bool {
    matches!(
        cmd,
        Commands::Reading { .. } | Commands::Stop { .. } | Commands::Quality { .. } | Commands::Ith { .. }
    )
}

/// Reject commands the view mode does not offer.
pub fn ensure_allowed(view: ViewMode, cmd: &Commands) -> AppResult<()> {
    let allowed = match view {
        ViewMode::Full => true,
        ViewMode::Operator => is_read_only(cmd) || is_floor_recording(cmd),
        ViewMode::Readonly => is_read_only(cmd),
    };

    if allowed {
        Ok(())
    } else {
        Err(AppError::ReadOnlyView(view.as_str().to_string()))
    }
}

/// Resolve a loom given by id or code.
pub(crate) fn resolve_loom<'a>(state: &'a AppState, key: &str) -> AppResult<&'a Loom> {
    state
        .find_loom(key)
        .ok_or_else(|| AppError::not_found("Loom", key))
}

/// `KEY=VALUE` argument.
pub(crate) fn split_pair(arg: &str) -> AppResult<(&str, &str)> {
    arg.split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| AppError::InvalidValue(format!("expected KEY=VALUE, got \"{arg}\"")))
}
