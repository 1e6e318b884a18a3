use crate::cli::parser::Commands;
use crate::core::backup::{BackupLogic, read_document_file};
use crate::core::reducer::Action;
use crate::core::store::Store;
use crate::db::log::ttlog;
use crate::errors::AppResult;
use crate::models::Millis;
use crate::ui::messages::{info, success, warning};
use crate::ui::prompt::confirm;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, store: &mut Store) -> AppResult<()> {
    if let Commands::Backup { file, compress } = cmd {
        let dest = expand_tilde(file);
        let written = BackupLogic::backup(store.state(), &dest, *compress)?;

        let _ = ttlog(
            &store.pool().conn,
            "backup",
            &written.to_string_lossy(),
            if *compress { "compressed" } else { "json" },
        );
        success(format!("Backup written to {}", written.display()));
    }

    Ok(())
}

/// Replace the whole document with the content of an exported file.
pub fn restore(cmd: &Commands, store: &mut Store, now: Millis) -> AppResult<()> {
    if let Commands::Restore { file, yes } = cmd {
        let path = expand_tilde(file);
        let next = read_document_file(&path)?;

        info(format!(
            "{} contains {} looms, {} products, {} closed shifts{}.",
            path.display(),
            next.looms.len(),
            next.products.len(),
            next.shift_history.len(),
            if next.active_shift.is_some() {
                " and an active shift"
            } else {
                ""
            }
        ));

        if !*yes {
            warning("The current data will be replaced.");
            if !confirm("Restore this document?")? {
                info("Restore cancelled.");
                return Ok(());
            }
        }

        store.dispatch(Action::Restore(Box::new(next)), now)?;
        success(format!("Data restored from {}", path.display()));
    }

    Ok(())
}
