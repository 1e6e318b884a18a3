use crate::cli::parser::HistoryAction;
use crate::config::Config;
use crate::core::calculator::aggregate::ShiftSummary;
use crate::core::calculator::loom::LoomMetrics;
use crate::core::calculator::reports::shift_records_on;
use crate::core::store::Store;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{field, header, info};
use crate::utils::date::parse_date_strict;
use crate::utils::formatting::{fmt_kg, fmt_meters, fmt_pct, or_dash};
use crate::utils::table::Table;
use crate::utils::time::{format_datetime, format_duration};

pub fn handle(action: &HistoryAction, store: &Store, cfg: &Config) -> AppResult<()> {
    let state = store.state();

    match action {
        HistoryAction::List { date, responsible } => {
            let date = date.as_deref().map(parse_date_strict).transpose()?;
            let records = shift_records_on(state, date, responsible.as_deref());

            if records.is_empty() {
                info("No closed shifts.");
                return Ok(());
            }

            let mut table = Table::new(&[
                "#", "Shift", "Start", "End", "Responsible", "Production (m)", "Efficiency",
            ]);
            for (index, record) in records {
                let summary = ShiftSummary::compute(&record.shift, state, record.end);
                table.add_row(vec![
                    (index + 1).to_string(),
                    record.shift.shift_name.clone(),
                    format_datetime(record.shift.user_start_time),
                    format_datetime(record.end),
                    record.shift.responsible.clone(),
                    summary
                        .as_ref()
                        .map(|s| format!("{:.0}", s.total_production_m))
                        .unwrap_or_else(|| "-".to_string()),
                    summary
                        .as_ref()
                        .map(|s| fmt_pct(s.avg_efficiency))
                        .unwrap_or_else(|| "-".to_string()),
                ]);
            }
            print!("{}", table.render());
        }

        HistoryAction::Show { n } => {
            let record = n
                .checked_sub(1)
                .and_then(|i| state.shift_history.get(i))
                .ok_or_else(|| AppError::not_found("Shift history entry", n.to_string()))?;
            let shift = &record.shift;

            header(
                format!("Shift {} - {}", shift.shift_name, format_datetime(shift.user_start_time)),
                &cfg.separator_char,
            );
            field("End", format_datetime(record.end));
            field("Duration", format_duration(record.end - shift.user_start_time));
            field("Responsible", &shift.responsible);
            field("Recorder", &shift.recorder);

            if let Some(summary) = ShiftSummary::compute(shift, state, record.end) {
                field("Production", fmt_meters(summary.total_production_m));
                field("Production (kg)", fmt_kg(summary.total_production_kg));
                field("Average efficiency", fmt_pct(summary.avg_efficiency));
                field("Estimated loss", fmt_kg(summary.total_loss_kg));
            }
            field("Summary", or_dash(Some(record.summary.as_str())));
            field("Action plan", or_dash(Some(record.action_plans.as_str())));

            let mut table = Table::new(&["Loom", "Prod (m)", "Eff", "OEE", "Downtime", "ITH"]);
            for loom in &state.looms {
                let m = LoomMetrics::compute(shift, loom, state.product_of(loom), &state.settings, record.end);
                table.add_row(vec![
                    loom.code.clone(),
                    format!("{:.0}", m.current_production),
                    fmt_pct(m.efficiency),
                    fmt_pct(m.oee),
                    format_duration(m.downtime_ms),
                    m.ith_count.to_string(),
                ]);
            }
            println!();
            print!("{}", table.render());
        }
    }

    Ok(())
}
