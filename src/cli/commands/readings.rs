use crate::cli::commands::{resolve_loom, split_pair};
use crate::cli::parser::ReadingAction;
use crate::core::readings::validate_readings;
use crate::core::reducer::Action;
use crate::core::shift::active;
use crate::core::store::Store;
use crate::errors::{AppError, AppResult};
use crate::models::Millis;
use crate::ui::messages::{info, success, warning};
use crate::utils::formatting::or_dash;
use crate::utils::table::Table;
use crate::utils::time::{format_clock, parse_instant};

pub fn handle(action: &ReadingAction, store: &mut Store, now: Millis) -> AppResult<()> {
    match action {
        ReadingAction::Log { values } => {
            let state = store.state();
            let shift = active(state)?;

            let mut raw = Vec::with_capacity(values.len());
            for arg in values {
                let (key, value) = split_pair(arg)?;
                let loom = resolve_loom(state, key)?;
                raw.push((loom.id.clone(), value.to_string()));
            }

            let inputs = validate_readings(shift, state, &raw)?;
            if inputs.is_empty() {
                warning("No readings to save.");
                return Ok(());
            }

            let count = inputs.len();
            store.dispatch(Action::LogReadings(inputs), now)?;
            success(format!("{count} reading(s) saved at {}.", format_clock(now)));
        }

        ReadingAction::Edit {
            id,
            value,
            at,
            notes,
        } => {
            let shift = active(store.state())?;
            let mut entry = shift
                .production
                .iter()
                .find(|p| &p.id == id)
                .cloned()
                .ok_or_else(|| AppError::not_found("Production entry", id.clone()))?;

            if let Some(v) = value {
                let reading = v
                    .trim()
                    .replace(',', ".")
                    .parse::<f64>()
                    .ok()
                    .filter(|r| r.is_finite() && *r >= 0.0)
                    .ok_or_else(|| AppError::InvalidValue(format!("reading \"{v}\"")))?;
                entry.reading = reading;
            }
            if let Some(at) = at {
                entry.timestamp = parse_instant(at, entry.timestamp)?;
            }
            if let Some(n) = notes {
                entry.notes = Some(n.clone()).filter(|n| !n.trim().is_empty());
            }

            store.dispatch(Action::UpdateProductionEntry(entry), now)?;
            success(format!("Reading {id} updated."));
        }

        ReadingAction::Del { id } => {
            store.dispatch(Action::DeleteProductionEntry(id.clone()), now)?;
            success(format!("Reading {id} deleted."));
        }

        ReadingAction::List { loom } => {
            let state = store.state();
            let shift = active(state)?;

            let loom_id = match loom {
                Some(key) => Some(resolve_loom(state, key)?.id.clone()),
                None => None,
            };

            let mut entries: Vec<_> = shift
                .production
                .iter()
                .filter(|p| loom_id.as_ref().is_none_or(|id| &p.loom_id == id))
                .collect();
            entries.sort_by(|a, b| {
                state
                    .loom_code(&a.loom_id)
                    .cmp(&state.loom_code(&b.loom_id))
                    .then(a.timestamp.cmp(&b.timestamp))
            });

            if entries.is_empty() {
                info("No readings.");
                return Ok(());
            }

            let mut table = Table::new(&["ID", "Loom", "Time", "Reading (m)", "Notes"]);
            for e in entries {
                table.add_row(vec![
                    e.id.clone(),
                    state.loom_code(&e.loom_id),
                    format_clock(e.timestamp),
                    format!("{:.2}", e.reading),
                    or_dash(e.notes.as_deref()),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
