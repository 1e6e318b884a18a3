//! Shift-wide totals across all looms.

use super::goal::to_kg;
use super::loom::LoomMetrics;
use super::pareto::top_counts;
use crate::models::Millis;
use crate::models::shift::ActiveShift;
use crate::models::state::AppState;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct LoomLoss {
    pub code: String,
    pub loss_meters: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShiftSummary {
    pub elapsed_hours: f64,
    pub total_production_m: f64,
    pub total_production_kg: f64,
    pub total_expected_m: f64,
    /// Ratio of sums, not the average of per-loom ratios.
    pub avg_efficiency: f64,
    /// m/h over elapsed time
    pub avg_productivity: f64,
    pub total_loss_kg: f64,
    pub top_reasons: Vec<(String, usize)>,
    pub loom_with_highest_loss: Option<LoomLoss>,
}

impl ShiftSummary {
    /// `None` before the shift window has started. Looms whose product
    /// cannot be resolved are left out of the totals.
    pub fn compute(shift: &ActiveShift, state: &AppState, as_of: Millis) -> Option<Self> {
        let elapsed_ms = as_of - shift.shift_start_time;
        if elapsed_ms <= 0 {
            return None;
        }

        let mut summary = ShiftSummary {
            elapsed_hours: 0.0,
            total_production_m: 0.0,
            total_production_kg: 0.0,
            total_expected_m: 0.0,
            avg_efficiency: 0.0,
            avg_productivity: 0.0,
            total_loss_kg: 0.0,
            top_reasons: Vec::new(),
            loom_with_highest_loss: None,
        };

        let mut reasons: Vec<String> = Vec::new();

        for loom in &state.looms {
            let Some(product) = state.product_of(loom) else {
                continue;
            };

            let m = LoomMetrics::compute(shift, loom, Some(product), &state.settings, as_of);
            summary.elapsed_hours = m.elapsed_hours;
            summary.total_production_m += m.current_production;
            summary.total_production_kg += m.production_kg;
            summary.total_expected_m += m.expected_production;

            let loss_m = m.downtime_loss_meters + m.ith_loss_meters;
            summary.total_loss_kg += to_kg(loss_m, Some(product));

            let is_new_max = summary
                .loom_with_highest_loss
                .as_ref()
                .is_none_or(|max| loss_m > max.loss_meters);
            if is_new_max {
                summary.loom_with_highest_loss = Some(LoomLoss {
                    code: loom.code.clone(),
                    loss_meters: loss_m,
                });
            }

            reasons.extend(shift.stops_for(&loom.id).map(|s| s.reason.clone()));
            reasons.extend(
                shift
                    .ith_for(&loom.id)
                    .map(|i| state.settings.ith_reason_code(&i.reason_id)),
            );
        }

        if summary.elapsed_hours > 0.0 {
            summary.avg_productivity = summary.total_production_m / summary.elapsed_hours;
        }
        if summary.total_expected_m > 0.0 {
            summary.avg_efficiency = summary.total_production_m / summary.total_expected_m * 100.0;
        }
        summary.top_reasons = top_counts(reasons, 5);

        Some(summary)
    }
}
