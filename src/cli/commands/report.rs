use crate::cli::commands::resolve_loom;
use crate::cli::parser::ReportAction;
use crate::core::store::Store;
use crate::db::log::ttlog;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::models::Millis;
use crate::utils::date::date_or_today;
use crate::utils::path::expand_tilde;

pub fn handle(action: &ReportAction, store: &mut Store, now: Millis) -> AppResult<()> {
    let (kind, file) = match action {
        ReportAction::Shift {
            format,
            file,
            history,
            force,
        } => {
            let path = expand_tilde(file);
            ExportLogic::report_shift(store.state(), *history, *format, &path, *force, now)?;
            ("shift", path)
        }

        ReportAction::Operator {
            operator,
            date,
            shift,
            format,
            file,
            force,
        } => {
            let path = expand_tilde(file);
            let date = date_or_today(date.as_ref())?;
            ExportLogic::report_operator(
                store.state(),
                operator,
                date,
                shift.as_deref(),
                *format,
                &path,
                *force,
            )?;
            ("operator", path)
        }

        ReportAction::Ith {
            date,
            loom,
            format,
            file,
            force,
        } => {
            let path = expand_tilde(file);
            let date = date_or_today(date.as_ref())?;
            let state = store.state();
            let loom_id = match loom {
                Some(key) => Some(resolve_loom(state, key)?.id.clone()),
                None => None,
            };
            ExportLogic::report_ith(state, date, loom_id.as_deref(), *format, &path, *force)?;
            ("ith", path)
        }
    };

    let _ = ttlog(
        &store.pool().conn,
        "export",
        &file.to_string_lossy(),
        &format!("{kind} report"),
    );
    Ok(())
}
