//! The single owner of the application document.
//!
//! Every change goes through [`Store::dispatch`]: reduce a copy, persist it,
//! audit it, then hand the snapshot to the file sync when one is bound.

use crate::core::reducer::{Action, reduce};
use crate::db::initialize::open_db;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::state_repo::{load_state, load_sync_file, save_state, save_sync_file};
use crate::errors::{AppError, AppResult};
use crate::models::Millis;
use crate::models::state::AppState;
use crate::sync::{FileSync, SyncStatus};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub struct Store {
    state: AppState,
    pool: DbPool,
    sync: Option<FileSync>,
    debounce: Duration,
}

impl Store {
    /// Load the document from `pool` and reconnect a previously bound file.
    pub fn open(pool: DbPool, debounce: Duration) -> AppResult<Self> {
        let state = load_state(&pool.conn)?;

        let sync = match load_sync_file(&pool.conn)? {
            Some(path) => Some(FileSync::connect(path, debounce)?),
            None => None,
        };

        Ok(Self {
            state,
            pool,
            sync,
            debounce,
        })
    }

    pub fn open_path(db_path: &str, debounce: Duration) -> AppResult<Self> {
        Self::open(open_db(db_path)?, debounce)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn pool(&mut self) -> &mut DbPool {
        &mut self.pool
    }

    /// Apply one action. On rejection nothing is persisted and the current
    /// snapshot stays as it was.
    pub fn dispatch(&mut self, action: Action, now: Millis) -> AppResult<()> {
        let operation = action.operation();
        let target = action.target();

        let next = match reduce(&self.state, action, now) {
            Ok(next) => next,
            Err(e) => {
                tracing::warn!(action = operation, target = %target, error = %e, "action rejected");
                return Err(e);
            }
        };

        save_state(&mut self.pool, &next)?;
        self.state = next;

        if let Err(e) = ttlog(&self.pool.conn, operation, &target, "applied") {
            tracing::warn!(error = %e, "failed to write audit log");
        }
        tracing::info!(action = operation, target = %target, "action applied");

        self.schedule_sync()
    }

    fn schedule_sync(&mut self) -> AppResult<()> {
        match &self.sync {
            Some(sync) if sync.is_connected() => sync.schedule(&self.state),
            Some(_) => self.drop_failed_sync(),
            None => Ok(()),
        }
    }

    pub fn is_synced(&self) -> bool {
        self.sync.as_ref().is_some_and(FileSync::is_connected)
    }

    /// Forget a sync binding whose worker has failed.
    fn drop_failed_sync(&mut self) -> AppResult<()> {
        if let Some(sync) = self.sync.take() {
            let reason = match sync.status() {
                SyncStatus::Failed(msg) => msg,
                _ => String::new(),
            };
            save_sync_file(&self.pool.conn, None)?;
            let _ = ttlog(
                &self.pool.conn,
                "sync_failed",
                &sync.path().to_string_lossy(),
                &reason,
            );
        }
        Ok(())
    }

    /// Bind `path` for sync. With `write_now` the current document is
    /// queued immediately (used when the file was empty).
    pub fn bind_sync(&mut self, path: &Path, write_now: bool) -> AppResult<()> {
        // replacing a binding flushes the old one on drop
        self.sync = None;

        let sync = FileSync::connect(path, self.debounce)?;
        save_sync_file(&self.pool.conn, Some(&path.to_string_lossy()))?;
        let _ = ttlog(
            &self.pool.conn,
            "sync_connect",
            &path.to_string_lossy(),
            "File sync connected",
        );

        if write_now {
            sync.schedule(&self.state)?;
        }
        self.sync = Some(sync);
        Ok(())
    }

    pub fn unbind_sync(&mut self) -> AppResult<bool> {
        let Some(sync) = self.sync.take() else {
            return Ok(false);
        };
        let flushed = sync.flush();
        save_sync_file(&self.pool.conn, None)?;
        let _ = ttlog(
            &self.pool.conn,
            "sync_disconnect",
            &sync.path().to_string_lossy(),
            "File sync disconnected",
        );
        flushed?;
        Ok(true)
    }

    pub fn sync_status(&self) -> Option<(PathBuf, SyncStatus)> {
        self.sync
            .as_ref()
            .map(|s| (s.path().to_path_buf(), s.status()))
    }

    /// Write any pending sync snapshot and wait for it. A failed write
    /// removes the binding and is reported as `SyncFailed`; the document
    /// itself is unaffected.
    pub fn flush(&mut self) -> AppResult<()> {
        let flushed = match &self.sync {
            Some(sync) => sync.flush(),
            None => return Ok(()),
        };

        match flushed {
            Ok(()) => Ok(()),
            Err(AppError::SyncFailed(msg)) => {
                self.drop_failed_sync()?;
                Err(AppError::SyncFailed(msg))
            }
            Err(e) => Err(e),
        }
    }
}
