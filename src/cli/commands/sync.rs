use crate::cli::parser::SyncAction;
use crate::core::reducer::Action;
use crate::core::store::Store;
use crate::errors::AppResult;
use crate::models::Millis;
use crate::sync::{SyncStatus, read_document};
use crate::ui::messages::{field, info, success, warning};
use crate::ui::prompt::confirm;
use crate::utils::path::expand_tilde;
use crate::utils::time::format_datetime;

pub fn handle(action: &SyncAction, store: &mut Store, now: Millis) -> AppResult<()> {
    match action {
        SyncAction::Connect { file, yes } => {
            let path = expand_tilde(file);

            match read_document(&path)? {
                Some(doc) => {
                    info(format!(
                        "{} holds a document with {} looms and {} closed shifts.",
                        path.display(),
                        doc.looms.len(),
                        doc.shift_history.len()
                    ));
                    if !*yes {
                        warning("Connecting loads it and replaces the current data.");
                        if !confirm("Load the file and connect?")? {
                            info("Sync not connected.");
                            return Ok(());
                        }
                    }
                    store.dispatch(Action::Restore(Box::new(doc)), now)?;
                    store.bind_sync(&path, false)?;
                }
                None => {
                    info("The file is empty; the current data will be written to it.");
                    store.bind_sync(&path, true)?;
                }
            }
            success(format!("Synced with {}", path.display()));
        }

        SyncAction::Disconnect => {
            if store.unbind_sync()? {
                success("File sync disconnected.");
            } else {
                info("No file sync is connected.");
            }
        }

        SyncAction::Status => match store.sync_status() {
            None => info("No file sync is connected."),
            Some((path, status)) => {
                field("File", path.display());
                let text = match status {
                    SyncStatus::Idle => "connected".to_string(),
                    SyncStatus::Pending => "write pending".to_string(),
                    SyncStatus::Saved { at, writes } => {
                        format!("saved at {} ({writes} write(s))", format_datetime(at))
                    }
                    SyncStatus::Failed(msg) => format!("failed: {msg}"),
                };
                field("Status", text);
            }
        },
    }

    Ok(())
}
