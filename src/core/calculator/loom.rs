//! Per-loom efficiency, availability, performance, quality and OEE.

use super::goal::{hourly_goal, ith_loss_per_intervention, to_kg};
use crate::models::catalog::{Loom, Product};
use crate::models::settings::Settings;
use crate::models::shift::ActiveShift;
use crate::models::stop_kind::StopKind;
use crate::models::{HOUR_MS, Millis};
use serde::Serialize;

/// Quality factor of the card variant that ignored quality entries.
pub const LEGACY_FIXED_QUALITY_FACTOR: f64 = 0.85;

#[derive(Debug, Clone, Serialize)]
pub struct ActiveStopInfo {
    pub kind: StopKind,
    pub reason: String,
    pub duration_ms: Millis,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoomMetrics {
    pub loom_id: String,
    pub loom_code: String,
    pub elapsed_ms: Millis,
    pub elapsed_hours: f64,
    /// metres since the first reading of the shift
    pub current_production: f64,
    pub production_kg: f64,
    pub hourly_goal: f64,
    pub expected_production: f64,
    pub efficiency: f64,
    pub downtime_ms: Millis,
    pub operating_ms: Millis,
    pub operating_hours: f64,
    pub actual_rate: f64,
    pub performance: f64,
    pub availability: f64,
    pub quality_factor: f64,
    /// Clamped into [0, 100].
    pub oee: f64,
    pub reading_count: usize,
    pub last_reading_at: Option<Millis>,
    pub ith_count: usize,
    pub ith_efficiency: f64,
    pub ith_loss_meters: f64,
    pub downtime_loss_meters: f64,
    pub active_stop: Option<ActiveStopInfo>,
}

impl LoomMetrics {
    pub fn compute(
        shift: &ActiveShift,
        loom: &Loom,
        product: Option<&Product>,
        settings: &Settings,
        as_of: Millis,
    ) -> Self {
        let goal = hourly_goal(product, settings);

        let elapsed_ms = as_of - shift.shift_start_time;
        let elapsed_hours = if elapsed_ms > 0 {
            elapsed_ms as f64 / HOUR_MS
        } else {
            0.0
        };

        let readings = shift.readings_for(&loom.id);
        let values: Vec<f64> = readings.iter().map(|r| r.reading).collect();
        let current_production = current_production(&values);

        let expected_production = goal * elapsed_hours;
        let efficiency = if expected_production > 0.0 {
            current_production / expected_production * 100.0
        } else {
            0.0
        };

        let downtime_ms: Millis = shift.stops_for(&loom.id).map(|s| s.duration_ms(as_of)).sum();
        let operating_ms = elapsed_ms - downtime_ms;
        let operating_hours = if operating_ms > 0 {
            operating_ms as f64 / HOUR_MS
        } else {
            0.0
        };

        let actual_rate = if operating_hours > 0.0 {
            current_production / operating_hours
        } else {
            0.0
        };
        let performance = if goal > 0.0 { actual_rate / goal } else { 0.0 };
        let availability = if elapsed_ms > 0 {
            operating_ms as f64 / elapsed_ms as f64
        } else {
            0.0
        };

        let off_spec = shift.off_spec_meters_for(&loom.id);
        let quality_factor = quality_factor(current_production, off_spec);
        let oee = oee(availability, performance, quality_factor);

        let ith_count = shift.ith_for(&loom.id).count();
        let ith_efficiency = ith_efficiency(readings.len(), ith_count);
        let ith_loss_meters = ith_count as f64 * ith_loss_per_intervention(goal);
        let downtime_loss_meters = downtime_ms as f64 / HOUR_MS * goal;

        let active_stop = [StopKind::Maintenance, StopKind::Operational]
            .into_iter()
            .find_map(|kind| {
                shift.active_stop(&loom.id, kind).map(|s| ActiveStopInfo {
                    kind,
                    reason: s.reason.clone(),
                    duration_ms: s.duration_ms(as_of),
                })
            });

        Self {
            loom_id: loom.id.clone(),
            loom_code: loom.code.clone(),
            elapsed_ms,
            elapsed_hours,
            current_production,
            production_kg: to_kg(current_production, product),
            hourly_goal: goal,
            expected_production,
            efficiency,
            downtime_ms,
            operating_ms,
            operating_hours,
            actual_rate,
            performance,
            availability,
            quality_factor,
            oee,
            reading_count: readings.len(),
            last_reading_at: readings.last().map(|r| r.timestamp),
            ith_count,
            ith_efficiency,
            ith_loss_meters,
            downtime_loss_meters,
            active_stop,
        }
    }

    /// Production minus expected production at 100%.
    pub fn difference(&self) -> f64 {
        self.current_production - self.expected_production
    }
}

/// `last - first` of time-sorted readings, never negative; 0 below two readings.
pub fn current_production(sorted_readings: &[f64]) -> f64 {
    match (sorted_readings.first(), sorted_readings.last()) {
        (Some(first), Some(last)) if sorted_readings.len() >= 2 => (last - first).max(0.0),
        _ => 0.0,
    }
}

/// Share of good metres; 1 before anything has been produced.
pub fn quality_factor(production: f64, off_spec_meters: f64) -> f64 {
    if production > 0.0 {
        ((production - off_spec_meters) / production).max(0.0)
    } else {
        1.0
    }
}

/// OEE in percent, clamped into [0, 100].
pub fn oee(availability: f64, performance: f64, quality_factor: f64) -> f64 {
    let raw = availability * performance * quality_factor * 100.0;
    if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 100.0) }
}

/// Micro-stop efficiency over reading intervals.
pub fn ith_efficiency(reading_count: usize, interventions: usize) -> f64 {
    let intervals = reading_count.saturating_sub(1);
    if intervals > 0 {
        ((intervals as f64 - interventions as f64) / intervals as f64).max(0.0) * 100.0
    } else if interventions > 0 {
        0.0
    } else {
        100.0
    }
}

/// OEE of the card variant with a hard-coded 85% quality factor.
#[deprecated(note = "ignores quality entries; use LoomMetrics::oee")]
pub fn legacy_fixed_quality_oee(metrics: &LoomMetrics) -> f64 {
    oee(
        metrics.availability,
        metrics.performance,
        LEGACY_FIXED_QUALITY_FACTOR,
    )
}
