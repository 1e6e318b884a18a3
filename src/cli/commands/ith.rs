use crate::cli::commands::resolve_loom;
use crate::cli::parser::IthAction;
use crate::core::reducer::Action;
use crate::core::shift::active;
use crate::core::store::Store;
use crate::errors::{AppError, AppResult};
use crate::models::Millis;
use crate::models::settings::Settings;
use crate::ui::messages::{info, success};
use crate::utils::table::Table;
use crate::utils::time::{format_clock, parse_instant};

fn reason_id_for(settings: &Settings, code: &str) -> AppResult<String> {
    settings
        .ith_reason_by_code(code.trim())
        .map(|r| r.id.clone())
        .ok_or_else(|| AppError::not_found("ITH reason", code))
}

pub fn handle(action: &IthAction, store: &mut Store, now: Millis) -> AppResult<()> {
    match action {
        IthAction::Add { loom, reason } => {
            let state = store.state();
            let loom = resolve_loom(state, loom)?;
            let reason_id = reason_id_for(&state.settings, reason)?;
            let (loom_id, code) = (loom.id.clone(), loom.code.clone());

            store.dispatch(Action::LogIth { loom_id, reason_id }, now)?;
            success(format!("ITH logged on {code} at {}.", format_clock(now)));
        }

        IthAction::Edit {
            id,
            reason,
            loom,
            at,
        } => {
            let state = store.state();
            let shift = active(state)?;
            let mut intervention = shift
                .ith_interventions
                .iter()
                .find(|i| &i.id == id)
                .cloned()
                .ok_or_else(|| AppError::not_found("ITH intervention", id.clone()))?;

            if let Some(code) = reason {
                intervention.reason_id = reason_id_for(&state.settings, code)?;
            }
            if let Some(key) = loom {
                intervention.loom_id = resolve_loom(state, key)?.id.clone();
            }
            if let Some(at) = at {
                intervention.timestamp = parse_instant(at, intervention.timestamp)?;
            }

            store.dispatch(Action::UpdateIth(intervention), now)?;
            success(format!("ITH {id} updated."));
        }

        IthAction::Del { id } => {
            store.dispatch(Action::DeleteIth(id.clone()), now)?;
            success(format!("ITH {id} deleted."));
        }

        IthAction::List { loom } => {
            let state = store.state();
            let shift = active(state)?;

            let loom_id = match loom {
                Some(key) => Some(resolve_loom(state, key)?.id.clone()),
                None => None,
            };

            let mut items: Vec<_> = shift
                .ith_interventions
                .iter()
                .filter(|i| loom_id.as_ref().is_none_or(|id| &i.loom_id == id))
                .collect();
            items.sort_by_key(|i| i.timestamp);

            if items.is_empty() {
                info("No ITH interventions.");
                return Ok(());
            }

            let mut table = Table::new(&["ID", "Time", "Loom", "Reason"]);
            for i in items {
                table.add_row(vec![
                    i.id.clone(),
                    format_clock(i.timestamp),
                    state.loom_code(&i.loom_id),
                    state.settings.ith_reason_label(&i.reason_id),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
