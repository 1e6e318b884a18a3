use crate::cli::commands::resolve_loom;
use crate::cli::parser::QualityAction;
use crate::core::reducer::Action;
use crate::core::shift::active;
use crate::core::store::Store;
use crate::errors::AppResult;
use crate::models::Millis;
use crate::ui::messages::{info, success};
use crate::utils::formatting::or_dash;
use crate::utils::table::Table;
use crate::utils::time::format_clock;

pub fn handle(action: &QualityAction, store: &mut Store, now: Millis) -> AppResult<()> {
    match action {
        QualityAction::Add {
            loom,
            residue,
            off_spec,
            notes,
        } => {
            let loom = resolve_loom(store.state(), loom)?;
            let (loom_id, code) = (loom.id.clone(), loom.code.clone());

            store.dispatch(
                Action::LogQuality {
                    loom_id,
                    residue_kg: *residue,
                    off_spec_fabric_meters: *off_spec,
                    notes: notes.clone(),
                },
                now,
            )?;
            success(format!("Quality entry saved for {code}."));
        }

        QualityAction::List => {
            let state = store.state();
            let shift = active(state)?;

            if shift.quality_entries.is_empty() {
                info("No quality entries.");
                return Ok(());
            }

            let mut table = Table::new(&["Time", "Loom", "Residue (kg)", "Off-spec (m)", "Notes"]);
            for q in &shift.quality_entries {
                table.add_row(vec![
                    format_clock(q.timestamp),
                    state.loom_code(&q.loom_id),
                    format!("{:.2}", q.residue_kg),
                    format!("{:.2}", q.off_spec_fabric_meters),
                    or_dash(q.notes.as_deref()),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
