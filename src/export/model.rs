//! Flat, string-based views of the data handed to the file writers.

use crate::core::calculator::aggregate::ShiftSummary;
use crate::core::calculator::goal::{product_goal, to_kg};
use crate::core::calculator::loom::LoomMetrics;
use crate::core::calculator::reports::{IthHourGroup, OperatorReport};
use crate::models::Millis;
use crate::models::shift::{ActiveShift, ShiftRecord};
use crate::models::state::AppState;
use crate::models::stop_kind::StopKind;
use crate::utils::date::format_date;
use crate::utils::time::{format_clock, format_datetime, format_duration};

/// One table: a sheet in xlsx, a section in pdf.
#[derive(Debug, Clone)]
pub struct ReportTable {
    pub name: String,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    fn new(name: &str, headers: &[&'static str]) -> Self {
        Self {
            name: name.to_string(),
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShiftReport {
    pub title: String,
    pub company: String,
    /// key/value header lines
    pub info: Vec<(String, String)>,
    pub production: ReportTable,
    pub stops: ReportTable,
    /// `None` when the shift has no interventions
    pub ith_losses: Option<ReportTable>,
    pub readings: ReportTable,
    pub notes: Vec<(String, String)>,
}

impl ShiftReport {
    /// Sections in output order.
    pub fn tables(&self) -> Vec<&ReportTable> {
        let mut out = vec![&self.production, &self.stops];
        if let Some(t) = &self.ith_losses {
            out.push(t);
        }
        out
    }
}

fn fmt2(v: f64) -> String {
    format!("{v:.2}")
}

fn fmt1(v: f64) -> String {
    format!("{v:.1}")
}

/// Report of the active shift (`record == None`) or of a closed one.
/// Open stops and the active shift are measured up to `now`.
pub fn shift_report(
    state: &AppState,
    shift: &ActiveShift,
    record: Option<&ShiftRecord>,
    now: Millis,
) -> ShiftReport {
    let as_of = record.map(|r| r.end).unwrap_or(now);

    // ---------------------------
    // Header
    // ---------------------------
    let mut info = vec![
        ("Shift".to_string(), shift.shift_name.clone()),
        ("Start".to_string(), format_datetime(shift.user_start_time)),
    ];
    if let Some(r) = record {
        info.push(("End".to_string(), format_datetime(r.end)));
    }
    info.push(("Responsible".to_string(), shift.responsible.clone()));
    info.push(("Recorder".to_string(), shift.recorder.clone()));

    if let Some(summary) = ShiftSummary::compute(shift, state, as_of) {
        info.push((
            "Total production (m)".to_string(),
            fmt2(summary.total_production_m),
        ));
        info.push((
            "Total production (kg)".to_string(),
            fmt2(summary.total_production_kg),
        ));
        info.push((
            "Average efficiency (%)".to_string(),
            fmt1(summary.avg_efficiency),
        ));
        info.push(("Estimated loss (kg)".to_string(), fmt2(summary.total_loss_kg)));
    }

    // ---------------------------
    // Production per loom
    // ---------------------------
    let mut production = ReportTable::new(
        "Production",
        &[
            "Loom",
            "Product",
            "Operator",
            "Production (m)",
            "Efficiency (%)",
            "OEE (%)",
            "Downtime",
            "ITH",
        ],
    );
    for loom in &state.looms {
        let product = state.product_of(loom);
        let m = LoomMetrics::compute(shift, loom, product, &state.settings, as_of);
        let operator = loom
            .operator_for(&shift.shift_name)
            .and_then(|id| state.operator(id))
            .map(|o| o.name.clone())
            .unwrap_or_else(|| "N/A".to_string());

        production.rows.push(vec![
            loom.code.clone(),
            product
                .map(|p| p.name.clone())
                .unwrap_or_else(|| "N/A".to_string()),
            operator,
            fmt2(m.current_production),
            fmt1(m.efficiency),
            fmt1(m.oee),
            format_duration(m.downtime_ms),
            m.ith_count.to_string(),
        ]);
    }

    // ---------------------------
    // Stops
    // ---------------------------
    let mut stops = ReportTable::new(
        "Stops",
        &["Loom", "Type", "Reason", "Start", "End", "Duration", "Notes"],
    );
    let mut stop_rows: Vec<Vec<String>> = [StopKind::Maintenance, StopKind::Operational]
        .into_iter()
        .flat_map(|kind| shift.stops(kind).iter().map(move |s| (kind, s)))
        .map(|(kind, s)| {
            vec![
                state.loom_code(&s.loom_id),
                kind.label().to_string(),
                s.reason.clone(),
                format_datetime(s.start),
                s.end
                    .map(format_datetime)
                    .unwrap_or_else(|| "Active".to_string()),
                format_duration(s.duration_ms(as_of)),
                s.notes.clone().unwrap_or_default(),
            ]
        })
        .collect();
    stop_rows.sort_by(|a, b| a[0].cmp(&b[0]));
    stops.rows = stop_rows;

    // ---------------------------
    // ITH losses
    // ---------------------------
    let ith_losses = if shift.ith_interventions.is_empty() {
        None
    } else {
        let mut table = ReportTable::new(
            "ITH Losses",
            &["Time", "Loom", "Code", "Description", "Loss (m)", "Loss (kg)"],
        );
        let mut items: Vec<(String, Millis, Vec<String>)> = shift
            .ith_interventions
            .iter()
            .map(|i| {
                let product = state.loom(&i.loom_id).and_then(|l| state.product_of(l));
                let loss_m = product.and_then(product_goal).unwrap_or(0.0) / 60.0;
                let reason = state.settings.ith_reason(&i.reason_id);
                let code = state.loom_code(&i.loom_id);
                (
                    code.clone(),
                    i.timestamp,
                    vec![
                        format_datetime(i.timestamp),
                        code,
                        state.settings.ith_reason_code(&i.reason_id),
                        reason
                            .map(|r| r.description.clone())
                            .unwrap_or_else(|| "-".to_string()),
                        fmt2(loss_m),
                        fmt2(to_kg(loss_m, product)),
                    ],
                )
            })
            .collect();
        items.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
        table.rows = items.into_iter().map(|(_, _, row)| row).collect();
        Some(table)
    };

    // ---------------------------
    // Raw readings (csv)
    // ---------------------------
    let mut readings = ReportTable::new("Readings", &["loom", "timestamp", "reading", "notes"]);
    let mut entries: Vec<_> = shift.production.iter().collect();
    entries.sort_by_key(|e| e.timestamp);
    for e in entries {
        readings.rows.push(vec![
            state.loom_code(&e.loom_id),
            format_datetime(e.timestamp),
            fmt2(e.reading),
            e.notes.clone().unwrap_or_default(),
        ]);
    }

    let mut notes = Vec::new();
    if let Some(r) = record {
        if !r.summary.trim().is_empty() {
            notes.push(("Shift summary".to_string(), r.summary.clone()));
        }
        if !r.action_plans.trim().is_empty() {
            notes.push(("Action plan".to_string(), r.action_plans.clone()));
        }
    }

    ShiftReport {
        title: "Shift Report".to_string(),
        company: state.settings.company_name.clone(),
        info,
        production,
        stops,
        ith_losses,
        readings,
        notes,
    }
}

pub fn operator_table(report: &OperatorReport) -> ReportTable {
    let mut table = ReportTable::new(
        "Operator production",
        &["Time", "Loom", "Reading (m)", "Produced (m)"],
    );
    for row in &report.rows {
        table.rows.push(vec![
            format_clock(row.timestamp),
            row.loom_code.clone(),
            fmt2(row.reading),
            fmt2(row.produced),
        ]);
    }
    table.rows.push(vec![
        String::new(),
        String::new(),
        "Total".to_string(),
        fmt2(report.total_produced),
    ]);
    table
}

pub fn operator_title(report: &OperatorReport) -> String {
    format!(
        "Operator report: {} ({})",
        report.operator_name,
        format_date(report.date)
    )
}

/// One row per intervention, followed by a subtotal row per hour.
pub fn ith_table(groups: &[IthHourGroup]) -> ReportTable {
    let mut table = ReportTable::new(
        "ITH by hour",
        &["Hour", "Time", "Loom", "Reason", "Loss (min)", "Loss (m)", "Loss (kg)"],
    );
    for g in groups {
        for item in &g.items {
            table.rows.push(vec![
                g.hour.clone(),
                format_clock(item.timestamp),
                item.loom_code.clone(),
                item.reason.clone(),
                "1".to_string(),
                String::new(),
                String::new(),
            ]);
        }
        table.rows.push(vec![
            g.hour.clone(),
            format!("{} ITH", g.total),
            String::new(),
            "Subtotal".to_string(),
            format!("{:.0}", g.loss_minutes),
            fmt2(g.loss_meters),
            fmt2(g.loss_kg),
        ]);
    }
    table
}
