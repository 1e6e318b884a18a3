use crate::cli::commands::resolve_loom;
use crate::cli::parser::StopAction;
use crate::core::reducer::Action;
use crate::core::shift::active;
use crate::core::stops::ensure_no_active_stop;
use crate::core::store::Store;
use crate::errors::{AppError, AppResult};
use crate::models::Millis;
use crate::models::stop_kind::StopKind;
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::{RED, colorize};
use crate::utils::formatting::or_dash;
use crate::utils::table::Table;
use crate::utils::time::{format_clock, format_duration};

const KINDS: [StopKind; 2] = [StopKind::Maintenance, StopKind::Operational];

pub fn handle(action: &StopAction, store: &mut Store, now: Millis) -> AppResult<()> {
    match action {
        StopAction::Start {
            loom,
            kind,
            reason,
            notes,
        } => {
            let state = store.state();
            let shift = active(state)?;
            let loom = resolve_loom(state, loom)?;

            let reason = reason.trim();
            if reason.is_empty() {
                return Err(AppError::MissingField("reason".to_string()));
            }
            let known = match kind {
                StopKind::Maintenance => &state.settings.stop_reasons.maintenance,
                StopKind::Operational => &state.settings.stop_reasons.operational,
            };
            if !known.iter().any(|r| r == reason) {
                warning(format!(
                    "\"{reason}\" is not in the {kind} reason list (add it with `loomshift reason add`)."
                ));
            }

            ensure_no_active_stop(shift, &loom.id, &loom.code, *kind)?;

            let (loom_id, code) = (loom.id.clone(), loom.code.clone());
            store.dispatch(
                Action::StartStop {
                    loom_id,
                    kind: *kind,
                    reason: reason.to_string(),
                    notes: notes.clone(),
                },
                now,
            )?;
            success(format!("{} stop started on {code}.", kind.label()));
        }

        StopAction::End { loom, kind } => {
            let state = store.state();
            let shift = active(state)?;
            let loom = resolve_loom(state, loom)?;

            let kinds: Vec<StopKind> = match kind {
                Some(k) => vec![*k],
                None => KINDS.to_vec(),
            };
            let (stop_id, kind) = kinds
                .into_iter()
                .find_map(|k| shift.active_stop(&loom.id, k).map(|s| (s.id.clone(), k)))
                .ok_or_else(|| AppError::not_found("Active stop on loom", loom.code.clone()))?;

            let code = loom.code.clone();
            store.dispatch(Action::EndStop { stop_id, kind }, now)?;
            success(format!("{} stop ended on {code}.", kind.label()));
        }

        StopAction::List { active: only_active, kind } => {
            let state = store.state();
            let shift = active(state)?;

            let mut table = Table::new(&[
                "ID", "Loom", "Type", "Reason", "Start", "End", "Duration", "Notes",
            ]);
            let mut rows = Vec::new();
            for k in KINDS.into_iter().filter(|k| kind.is_none_or(|want| want == *k)) {
                for s in shift.stops(k) {
                    if *only_active && !s.is_active() {
                        continue;
                    }
                    rows.push((state.loom_code(&s.loom_id), s.start, k, s));
                }
            }
            rows.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

            if rows.is_empty() {
                info("No stops.");
                return Ok(());
            }

            for (code, _, k, s) in rows {
                let end = match s.end {
                    Some(end) => format_clock(end),
                    None => colorize("active", RED),
                };
                table.add_row(vec![
                    s.id.clone(),
                    code,
                    k.label().to_string(),
                    s.reason.clone(),
                    format_clock(s.start),
                    end,
                    format_duration(s.duration_ms(now)),
                    or_dash(s.notes.as_deref()),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
