//! Debounced mirroring of the application document into a local JSON file.
//!
//! A worker thread owns the file. Snapshots are sent through a channel; a
//! snapshot followed by another within the debounce window is dropped, so a
//! burst of changes costs one write of the last snapshot. A failed write
//! stops the worker: the binding is gone until the user connects again.

use crate::errors::{AppError, AppResult};
use crate::models::Millis;
use crate::models::state::AppState;
use crate::utils::time::now_ms;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum SyncStatus {
    Idle,
    /// A snapshot is waiting for the debounce window to close.
    Pending,
    Saved {
        at: Millis,
        writes: u64,
    },
    Failed(String),
}

enum Msg {
    Write(String),
    Flush(Sender<()>),
    Shutdown,
}

pub struct FileSync {
    path: PathBuf,
    tx: Sender<Msg>,
    status: Arc<Mutex<SyncStatus>>,
    worker: Option<JoinHandle<()>>,
}

fn set_status(status: &Mutex<SyncStatus>, value: SyncStatus) {
    if let Ok(mut s) = status.lock() {
        *s = value;
    }
}

struct Worker {
    path: PathBuf,
    status: Arc<Mutex<SyncStatus>>,
    writes: u64,
}

impl Worker {
    /// Write `text`; false once the file cannot be written.
    fn write(&mut self, text: &str) -> bool {
        match fs::write(&self.path, text) {
            Ok(()) => {
                self.writes += 1;
                tracing::debug!(path = %self.path.display(), writes = self.writes, "sync file written");
                set_status(
                    &self.status,
                    SyncStatus::Saved {
                        at: now_ms(),
                        writes: self.writes,
                    },
                );
                true
            }
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "sync write failed, disconnecting");
                set_status(&self.status, SyncStatus::Failed(e.to_string()));
                false
            }
        }
    }

    fn run(mut self, rx: mpsc::Receiver<Msg>, debounce: Duration) {
        let mut pending: Option<String> = None;

        loop {
            let msg = if pending.is_some() {
                match rx.recv_timeout(debounce) {
                    Ok(m) => Some(m),
                    Err(RecvTimeoutError::Timeout) => None,
                    Err(RecvTimeoutError::Disconnected) => Some(Msg::Shutdown),
                }
            } else {
                match rx.recv() {
                    Ok(m) => Some(m),
                    Err(_) => return,
                }
            };

            match msg {
                Some(Msg::Write(text)) => {
                    pending = Some(text);
                    set_status(&self.status, SyncStatus::Pending);
                }
                Some(Msg::Flush(ack)) => {
                    let ok = match pending.take() {
                        Some(text) => self.write(&text),
                        None => true,
                    };
                    let _ = ack.send(());
                    if !ok {
                        return;
                    }
                }
                Some(Msg::Shutdown) => {
                    if let Some(text) = pending.take() {
                        self.write(&text);
                    }
                    return;
                }
                // debounce window closed
                None => {
                    if let Some(text) = pending.take()
                        && !self.write(&text)
                    {
                        return;
                    }
                }
            }
        }
    }
}

impl FileSync {
    /// Start mirroring into `path`. Nothing is written until the first
    /// snapshot is scheduled.
    pub fn connect(path: impl Into<PathBuf>, debounce: Duration) -> AppResult<Self> {
        let path = path.into();
        let status = Arc::new(Mutex::new(SyncStatus::Idle));
        let (tx, rx) = mpsc::channel();

        let worker = Worker {
            path: path.clone(),
            status: Arc::clone(&status),
            writes: 0,
        };

        let handle = thread::Builder::new()
            .name("loomshift-sync".to_string())
            .spawn(move || worker.run(rx, debounce))?;

        tracing::info!(path = %path.display(), debounce_ms = debounce.as_millis() as u64, "file sync connected");

        Ok(Self {
            path,
            tx,
            status,
            worker: Some(handle),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn status(&self) -> SyncStatus {
        self.status
            .lock()
            .map(|s| s.clone())
            .unwrap_or_else(|_| SyncStatus::Failed("sync status unavailable".to_string()))
    }

    pub fn is_connected(&self) -> bool {
        !matches!(self.status(), SyncStatus::Failed(_))
    }

    /// Queue a pretty-printed snapshot. Ignored once the sync has failed.
    pub fn schedule(&self, state: &AppState) -> AppResult<()> {
        if !self.is_connected() {
            return Ok(());
        }
        let text = serde_json::to_string_pretty(state)?;
        if self.tx.send(Msg::Write(text)).is_err() {
            tracing::debug!("sync worker gone, snapshot dropped");
        }
        Ok(())
    }

    /// Write the pending snapshot now and wait for it.
    pub fn flush(&self) -> AppResult<()> {
        let (ack_tx, ack_rx) = mpsc::channel();
        if self.tx.send(Msg::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }

        match self.status() {
            SyncStatus::Failed(msg) => Err(AppError::SyncFailed(msg)),
            _ => Ok(()),
        }
    }
}

impl Drop for FileSync {
    fn drop(&mut self) {
        let _ = self.tx.send(Msg::Shutdown);
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}

/// Read a bound file. `None` when it is empty, so the caller can seed it.
pub fn read_document(path: &Path) -> AppResult<Option<AppState>> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    if text.trim().is_empty() {
        return Ok(None);
    }

    crate::core::backup::parse_document(&text).map(Some)
}
