//! Unified application error type.
//! Every module (db, core, sync, export, cli) returns AppError so that the
//! CLI can report rejections and failures in one place.

use std::fmt;
use std::io;
use thiserror::Error;

/// A single rejected reading from a production batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingError {
    pub loom: String,
    pub message: String,
}

impl fmt::Display for ReadingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.loom, self.message)
    }
}

fn join_reading_errors(errors: &[ReadingError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Input validation
    // ---------------------------
    #[error("Invalid readings: {}", join_reading_errors(.0))]
    InvalidReadings(Vec<ReadingError>),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    // ---------------------------
    // Domain rules
    // ---------------------------
    #[error("No configured shift window contains the current time. Check the shift settings.")]
    NoShiftWindow,

    #[error("No active shift")]
    NoActiveShift,

    #[error("The shift baseline reading cannot be deleted")]
    BaselineEntryLocked,

    #[error("Loom {loom}: wait {remaining_secs}s before logging another ITH")]
    IthCooldown { loom: String, remaining_secs: i64 },

    #[error("Stop reason \"{0}\" already exists")]
    DuplicateReason(String),

    #[error("ITH reason code \"{0}\" already exists")]
    DuplicateIthCode(String),

    #[error("Loom {loom} already has an active {kind} stop")]
    StopAlreadyActive { loom: String, kind: String },

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Command not available in {0} view")]
    ReadOnlyView(String),

    // ---------------------------
    // External state
    // ---------------------------
    #[error("Invalid or corrupted backup: {0}")]
    InvalidBackup(String),

    #[error("File sync failed: {0}")]
    SyncFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        AppError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
