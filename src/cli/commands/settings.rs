use crate::cli::parser::SettingsAction;
use crate::config::Config;
use crate::core::reducer::Action;
use crate::core::store::Store;
use crate::errors::AppResult;
use crate::models::Millis;
use crate::models::settings::ShiftTime;
use crate::ui::messages::{field, header, success};
use crate::utils::formatting::or_dash;
use crate::utils::table::Table;

pub fn handle(action: &SettingsAction, store: &mut Store, cfg: &Config, now: Millis) -> AppResult<()> {
    match action {
        SettingsAction::Show => {
            let settings = &store.state().settings;
            header("Settings", &cfg.separator_char);
            field("Company", or_dash(Some(settings.company_name.as_str())));
            field("Efficiency goal", format!("{:.1}%", settings.efficiency_goal));
            field(
                "Fallback hourly goal",
                format!("{:.1} m/h", settings.hourly_production_goal),
            );
            field("Maintenance reasons", settings.stop_reasons.maintenance.len());
            field("Operational reasons", settings.stop_reasons.operational.len());
            field("ITH reasons", settings.ith_stop_reasons.len());

            println!();
            let mut table = Table::new(&["Shift", "Start", "End"]);
            for s in &settings.shifts {
                table.add_row(vec![s.name.clone(), s.start.clone(), s.end.clone()]);
            }
            print!("{}", table.render());
        }

        SettingsAction::Set {
            company,
            efficiency_goal,
            hourly_goal,
        } => {
            let mut settings = store.state().settings.clone();
            if let Some(c) = company {
                settings.company_name = c.trim().to_string();
            }
            if let Some(g) = efficiency_goal {
                settings.efficiency_goal = *g;
            }
            if let Some(g) = hourly_goal {
                settings.hourly_production_goal = *g;
            }
            store.dispatch(Action::UpdateSettings(settings), now)?;
            success("Settings updated.");
        }

        SettingsAction::ShiftSet { name, start, end } => {
            store.dispatch(
                Action::SetShiftWindow(ShiftTime {
                    name: name.trim().to_string(),
                    start: start.trim().to_string(),
                    end: end.trim().to_string(),
                }),
                now,
            )?;
            success(format!("Shift window {} set to {start}-{end}.", name.trim()));
        }

        SettingsAction::ShiftDel { name } => {
            store.dispatch(Action::RemoveShiftWindow(name.clone()), now)?;
            success(format!("Shift window {name} removed."));
        }
    }

    Ok(())
}
