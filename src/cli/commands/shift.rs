use crate::cli::parser::ShiftAction;
use crate::config::Config;
use crate::core::calculator::aggregate::ShiftSummary;
use crate::core::reducer::Action;
use crate::core::shift::active;
use crate::core::store::Store;
use crate::errors::AppResult;
use crate::models::Millis;
use crate::ui::messages::{field, header, info, success, warning};
use crate::utils::formatting::{fmt_kg, fmt_meters, fmt_pct};
use crate::utils::time::{format_datetime, format_duration};

pub fn handle(action: &ShiftAction, store: &mut Store, cfg: &Config, now: Millis) -> AppResult<()> {
    match action {
        ShiftAction::Start {
            responsible,
            recorder,
        } => {
            if store.state().active_shift.is_some() {
                warning("An active shift is being replaced.");
            }
            store.dispatch(
                Action::StartShift {
                    responsible: responsible.clone(),
                    recorder: recorder.clone(),
                },
                now,
            )?;
            let shift = active(store.state())?;
            success(format!(
                "Shift {} started (window from {}), {} baseline readings.",
                shift.shift_name,
                format_datetime(shift.shift_start_time),
                shift.production.len()
            ));
        }

        ShiftAction::End {
            summary,
            action_plans,
        } => {
            if store.state().active_shift.is_none() {
                info("No active shift.");
                return Ok(());
            }
            store.dispatch(
                Action::EndShift {
                    summary: summary.clone(),
                    action_plans: action_plans.clone(),
                },
                now,
            )?;
            success("Shift closed and moved to the history.");
        }

        ShiftAction::Status => print_status(store, cfg, now)?,
    }

    Ok(())
}

fn print_status(store: &Store, cfg: &Config, now: Millis) -> AppResult<()> {
    let state = store.state();
    let Some(shift) = state.active_shift.as_ref() else {
        info("No active shift.");
        return Ok(());
    };

    header(format!("Shift {}", shift.shift_name), &cfg.separator_char);
    field("Window start", format_datetime(shift.shift_start_time));
    field("Started at", format_datetime(shift.user_start_time));
    field("Responsible", &shift.responsible);
    field("Recorder", &shift.recorder);
    field("Elapsed", format_duration(now - shift.shift_start_time));

    let active_stops = shift
        .maintenance
        .iter()
        .chain(shift.interventions.iter())
        .filter(|s| s.is_active())
        .count();
    field("Active stops", active_stops);
    field("ITH interventions", shift.ith_interventions.len());

    if let Some(summary) = ShiftSummary::compute(shift, state, now) {
        field("Production", fmt_meters(summary.total_production_m));
        field("Production (kg)", fmt_kg(summary.total_production_kg));
        field("Expected", fmt_meters(summary.total_expected_m));
        field("Average efficiency", fmt_pct(summary.avg_efficiency));
        field("Average productivity", format!("{:.1} m/h", summary.avg_productivity));
        field("Estimated loss", fmt_kg(summary.total_loss_kg));

        if let Some(loss) = &summary.loom_with_highest_loss {
            field(
                "Highest loss",
                format!("{} ({})", loss.code, fmt_meters(loss.loss_meters)),
            );
        }
        if !summary.top_reasons.is_empty() {
            let reasons: Vec<String> = summary
                .top_reasons
                .iter()
                .map(|(label, n)| format!("{label} ({n})"))
                .collect();
            field("Top reasons", reasons.join(", "));
        }
    }

    Ok(())
}
