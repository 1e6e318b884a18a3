//! Read-only views of the active shift: dashboard, Pareto and hourly output.

use crate::cli::commands::resolve_loom;
use crate::config::Config;
use crate::core::calculator::hourly::hourly_production;
use crate::core::calculator::loom::LoomMetrics;
use crate::core::calculator::pareto::{ParetoItem, ith_pareto, stop_pareto};
use crate::core::shift::active;
use crate::core::store::Store;
use crate::errors::AppResult;
use crate::models::Millis;
use crate::ui::messages::{field, header, info};
use crate::utils::colors::{
    color_for_difference, color_for_efficiency, colorize, RED, YELLOW,
};
use crate::utils::formatting::{fmt_kg, fmt_meters, fmt_pct, fmt_signed_meters};
use crate::utils::table::Table;
use crate::utils::time::{format_clock, format_duration};

// ---------------------------
// Dashboard
// ---------------------------

pub fn dashboard(store: &Store, cfg: &Config, loom: Option<&str>, now: Millis) -> AppResult<()> {
    let state = store.state();
    let Some(shift) = state.active_shift.as_ref() else {
        info("No active shift.");
        return Ok(());
    };
    let goal = state.settings.efficiency_goal;

    if let Some(key) = loom {
        let loom = resolve_loom(state, key)?;
        let product = state.product_of(loom);
        let m = LoomMetrics::compute(shift, loom, product, &state.settings, now);

        header(format!("Loom {}", m.loom_code), &cfg.separator_char);
        field(
            "Product",
            product.map(|p| p.name.as_str()).unwrap_or("N/A"),
        );
        field("Hourly goal", format!("{:.1} m/h", m.hourly_goal));
        field("Production", fmt_meters(m.current_production));
        field("Production (kg)", fmt_kg(m.production_kg));
        field("Expected", fmt_meters(m.expected_production));
        field(
            "Difference",
            colorize(&fmt_signed_meters(m.difference()), color_for_difference(m.difference())),
        );
        field(
            "Efficiency",
            colorize(&fmt_pct(m.efficiency), color_for_efficiency(m.efficiency, goal)),
        );
        field("Availability", fmt_pct(m.availability * 100.0));
        field("Performance", fmt_pct(m.performance * 100.0));
        field("Quality", fmt_pct(m.quality_factor * 100.0));
        field("OEE", fmt_pct(m.oee));
        field("Downtime", format_duration(m.downtime_ms));
        field("Readings", m.reading_count);
        field(
            "Last reading",
            m.last_reading_at
                .map(format_clock)
                .unwrap_or_else(|| "-".to_string()),
        );
        field("ITH", m.ith_count);
        field("ITH efficiency", fmt_pct(m.ith_efficiency));
        field("ITH loss", fmt_meters(m.ith_loss_meters));
        if let Some(stop) = &m.active_stop {
            field(
                "Active stop",
                colorize(
                    &format!(
                        "{} - {} ({})",
                        stop.kind.label(),
                        stop.reason,
                        format_duration(stop.duration_ms)
                    ),
                    RED,
                ),
            );
        }
        return Ok(());
    }

    header(
        format!(
            "Shift {} - {} elapsed",
            shift.shift_name,
            format_duration(now - shift.shift_start_time)
        ),
        &cfg.separator_char,
    );

    let mut table = Table::new(&[
        "Loom", "Product", "Operator", "Prod (m)", "Diff (m)", "Eff", "OEE", "ITH", "Status",
    ]);

    for loom in &state.looms {
        let product = state.product_of(loom);
        let m = LoomMetrics::compute(shift, loom, product, &state.settings, now);

        let operator = loom
            .operator_for(&shift.shift_name)
            .and_then(|id| state.operator(id))
            .map(|o| o.name.clone())
            .unwrap_or_else(|| "-".to_string());

        let status = match &m.active_stop {
            Some(stop) => colorize(&format!("{}: {}", stop.kind.label(), stop.reason), RED),
            None if m.reading_count < 2 => colorize("no readings", YELLOW),
            None => "running".to_string(),
        };

        table.add_row(vec![
            loom.code.clone(),
            product
                .map(|p| p.name.clone())
                .unwrap_or_else(|| "N/A".to_string()),
            operator,
            format!("{:.0}", m.current_production),
            colorize(
                &fmt_signed_meters(m.difference()),
                color_for_difference(m.difference()),
            ),
            colorize(&fmt_pct(m.efficiency), color_for_efficiency(m.efficiency, goal)),
            fmt_pct(m.oee),
            m.ith_count.to_string(),
            status,
        ]);
    }

    print!("{}", table.render());
    Ok(())
}

// ---------------------------
// Pareto
// ---------------------------

fn print_pareto(items: &[ParetoItem], unit: &str) {
    if items.is_empty() {
        info("Nothing to rank.");
        return;
    }

    let value_header = format!("Value ({unit})");
    let mut table = Table::new(&["Reason", value_header.as_str(), "%", "Cumulative %"]);
    for item in items {
        table.add_row(vec![
            item.label.clone(),
            format!("{:.1}", item.value),
            format!("{:.1}", item.percentage),
            format!("{:.1}", item.cumulative),
        ]);
    }
    print!("{}", table.render());
}

pub fn pareto(store: &Store, cfg: &Config, ith: bool, loom: Option<&str>, now: Millis) -> AppResult<()> {
    let state = store.state();
    let shift = active(state)?;

    let loom_id = match loom {
        Some(key) => Some(resolve_loom(state, key)?.id.clone()),
        None => None,
    };
    let wanted = |id: &str| loom_id.as_deref().is_none_or(|l| l == id);

    if ith {
        header("ITH Pareto", &cfg.separator_char);
        let items = ith_pareto(
            shift.ith_interventions.iter().filter(|i| wanted(&i.loom_id)),
            &state.settings,
        );
        print_pareto(&items, "count");
    } else {
        header("Downtime Pareto", &cfg.separator_char);
        let stops = shift
            .maintenance
            .iter()
            .chain(shift.interventions.iter())
            .filter(|s| wanted(&s.loom_id));
        let items = stop_pareto(stops, now);
        print_pareto(&items, "min");
    }

    Ok(())
}

// ---------------------------
// Hourly
// ---------------------------

pub fn hourly(store: &Store, cfg: &Config, loom: &str) -> AppResult<()> {
    let state = store.state();
    let shift = active(state)?;
    let loom = resolve_loom(state, loom)?;

    header(format!("Hourly production - {}", loom.code), &cfg.separator_char);

    let buckets = hourly_production(&shift.readings_for(&loom.id));
    if buckets.is_empty() {
        info("At least two readings are needed.");
        return Ok(());
    }

    let mut table = Table::new(&["Hour", "Production (m)"]);
    for b in &buckets {
        table.add_row(vec![b.label.clone(), format!("{:.1}", b.production)]);
    }
    print!("{}", table.render());
    Ok(())
}
