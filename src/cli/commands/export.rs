use crate::cli::parser::Commands;
use crate::core::backup::BackupLogic;
use crate::core::store::Store;
use crate::db::log::ttlog;
use crate::errors::AppResult;
use crate::export::{ExportFormat, ExportLogic, ensure_writable};
use crate::models::Millis;
use crate::ui::messages::success;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, store: &mut Store, now: Millis) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        force,
    } = cmd
    {
        let path = expand_tilde(file);

        match format {
            ExportFormat::Json => {
                ensure_writable(&path, *force)?;
                BackupLogic::export_json(store.state(), &path)?;
                success(format!("Document exported to {}", path.display()));
            }
            other => ExportLogic::report_shift(store.state(), None, *other, &path, *force, now)?,
        }

        let _ = ttlog(
            &store.pool().conn,
            "export",
            &path.to_string_lossy(),
            format.as_str(),
        );
    }
    Ok(())
}
