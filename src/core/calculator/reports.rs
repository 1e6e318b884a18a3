//! Per-operator production and hourly ITH reports over the shifts of one
//! calendar day.

use super::goal::{product_goal, to_kg};
use crate::models::Millis;
use crate::models::entries::{IthIntervention, ProductionEntry};
use crate::models::shift::{ActiveShift, ShiftRecord};
use crate::models::state::AppState;
use crate::utils::date::local_date_of;
use crate::utils::time::{hour_label, hour_of};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

fn starts_on(shift: &ActiveShift, date: NaiveDate) -> bool {
    local_date_of(shift.user_start_time) == Some(date)
}

/// History shifts plus the active one that started on `date`.
fn shifts_on(state: &AppState, date: NaiveDate) -> Vec<&ActiveShift> {
    state
        .shift_history
        .iter()
        .map(|r| &r.shift)
        .chain(state.active_shift.iter())
        .filter(|s| starts_on(s, date))
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct OperatorReportRow {
    pub timestamp: Millis,
    pub loom_code: String,
    pub reading: f64,
    pub produced: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OperatorReport {
    pub operator_name: String,
    pub date: NaiveDate,
    pub rows: Vec<OperatorReportRow>,
    pub total_produced: f64,
}

/// Readings taken on the looms assigned to `operator_id` during the shifts
/// started on `date`, optionally restricted to one shift name.
///
/// The first reading of each loom only serves as the reference for the
/// second one. Baseline rows contribute to the total but are not listed.
pub fn operator_report(
    state: &AppState,
    date: NaiveDate,
    shift_name: Option<&str>,
    operator_id: &str,
) -> OperatorReport {
    let operator_name = state
        .operator(operator_id)
        .map(|o| o.name.clone())
        .unwrap_or_else(|| "N/A".to_string());

    let mut by_loom: BTreeMap<&str, Vec<&ProductionEntry>> = BTreeMap::new();

    for shift in shifts_on(state, date) {
        if shift_name.is_some_and(|name| name != shift.shift_name) {
            continue;
        }

        let loom_ids: Vec<&str> = state
            .looms
            .iter()
            .filter(|l| l.operator_for(&shift.shift_name) == Some(operator_id))
            .map(|l| l.id.as_str())
            .collect();

        for entry in &shift.production {
            if loom_ids.contains(&entry.loom_id.as_str()) {
                by_loom.entry(entry.loom_id.as_str()).or_default().push(entry);
            }
        }
    }

    let mut rows = Vec::new();
    let mut total_produced = 0.0;

    for (loom_id, mut entries) in by_loom {
        entries.sort_by_key(|e| e.timestamp);
        for pair in entries.windows(2) {
            let produced = (pair[1].reading - pair[0].reading).max(0.0);
            total_produced += produced;
            if !pair[1].is_baseline() {
                rows.push(OperatorReportRow {
                    timestamp: pair[1].timestamp,
                    loom_code: state.loom_code(loom_id),
                    reading: pair[1].reading,
                    produced,
                });
            }
        }
    }

    rows.sort_by_key(|r| r.timestamp);

    OperatorReport {
        operator_name,
        date,
        rows,
        total_produced,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IthReportItem {
    pub timestamp: Millis,
    pub loom_code: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IthHourGroup {
    pub hour: String,
    pub items: Vec<IthReportItem>,
    pub total: usize,
    /// one minute per intervention
    pub loss_minutes: f64,
    pub loss_meters: f64,
    pub loss_kg: f64,
}

/// Interventions of the shifts started on `date`, grouped by local hour.
///
/// Losses are costed from the product goal only; a loom without a usable
/// product contributes no metres.
pub fn ith_hourly_report(
    state: &AppState,
    date: NaiveDate,
    loom_id: Option<&str>,
) -> Vec<IthHourGroup> {
    let mut groups: BTreeMap<String, Vec<&IthIntervention>> = BTreeMap::new();

    for shift in shifts_on(state, date) {
        for i in &shift.ith_interventions {
            if loom_id.is_some_and(|id| id != i.loom_id) {
                continue;
            }
            groups
                .entry(hour_label(hour_of(i.timestamp)))
                .or_default()
                .push(i);
        }
    }

    groups
        .into_iter()
        .map(|(hour, interventions)| {
            let mut loss_meters = 0.0;
            let mut loss_kg = 0.0;

            let items = interventions
                .iter()
                .map(|i| {
                    let product = state.loom(&i.loom_id).and_then(|l| state.product_of(l));
                    let goal = product.and_then(product_goal).unwrap_or(0.0);
                    let meters = goal / 60.0;
                    loss_meters += meters;
                    loss_kg += to_kg(meters, product);

                    IthReportItem {
                        timestamp: i.timestamp,
                        loom_code: state.loom_code(&i.loom_id),
                        reason: state.settings.ith_reason_label(&i.reason_id),
                    }
                })
                .collect();

            IthHourGroup {
                hour,
                items,
                total: interventions.len(),
                loss_minutes: interventions.len() as f64,
                loss_meters,
                loss_kg,
            }
        })
        .collect()
}

/// Closed shifts started on `date`, newest first. A responsible filter
/// matches case-insensitively on a substring.
pub fn shift_records_on<'a>(
    state: &'a AppState,
    date: Option<NaiveDate>,
    responsible: Option<&str>,
) -> Vec<(usize, &'a ShiftRecord)> {
    let needle = responsible.map(str::to_lowercase);

    let mut records: Vec<(usize, &ShiftRecord)> = state
        .shift_history
        .iter()
        .enumerate()
        .filter(|(_, r)| date.is_none_or(|d| starts_on(&r.shift, d)))
        .filter(|(_, r)| {
            needle
                .as_deref()
                .is_none_or(|n| r.shift.responsible.to_lowercase().contains(n))
        })
        .collect();

    records.sort_by(|a, b| b.1.shift.user_start_time.cmp(&a.1.shift.user_start_time));
    records
}
