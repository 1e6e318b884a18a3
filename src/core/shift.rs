use crate::core::schedule::{current_shift, shift_start};
use crate::errors::{AppError, AppResult};
use crate::models::entries::ProductionEntry;
use crate::models::shift::{ActiveShift, ShiftRecord};
use crate::models::state::AppState;
use crate::models::{BASELINE_NOTE, Millis};
use crate::utils::time::to_local;

/// Opening and closing of the active shift.
pub struct ShiftLogic;

impl ShiftLogic {
    /// Open a shift in the configured window containing `now`.
    ///
    /// Every loom gets a zero baseline reading at the window start so that
    /// production is measured from there. An already active shift is
    /// replaced.
    pub fn start(
        state: &mut AppState,
        responsible: String,
        recorder: String,
        now: Millis,
    ) -> AppResult<()> {
        let local = to_local(now).ok_or_else(|| AppError::InvalidTime(now.to_string()))?;

        let window = current_shift(&state.settings.shifts, &local).ok_or(AppError::NoShiftWindow)?;
        let start = shift_start(window, &local)?;

        let production = state
            .looms
            .iter()
            .map(|loom| ProductionEntry {
                id: format!("prod-start-{start}-{}", loom.id),
                loom_id: loom.id.clone(),
                reading: 0.0,
                timestamp: start,
                notes: Some(BASELINE_NOTE.to_string()),
            })
            .collect();

        if state.active_shift.is_some() {
            tracing::warn!("starting a shift while another one is active");
        }

        state.active_shift = Some(ActiveShift {
            shift_name: window.name.clone(),
            shift_start_time: start,
            user_start_time: now,
            responsible,
            recorder,
            production,
            maintenance: Vec::new(),
            interventions: Vec::new(),
            quality_entries: Vec::new(),
            ith_interventions: Vec::new(),
        });

        Ok(())
    }

    /// Move the active shift to the front of the history. No-op without one.
    pub fn end(state: &mut AppState, summary: String, action_plans: String, now: Millis) {
        let Some(shift) = state.active_shift.take() else {
            tracing::debug!("end shift requested with no active shift");
            return;
        };

        state.shift_history.insert(
            0,
            ShiftRecord {
                shift,
                end: now,
                summary,
                action_plans,
            },
        );
    }
}

/// The active shift, or `NoActiveShift`.
pub fn active_mut(state: &mut AppState) -> AppResult<&mut ActiveShift> {
    state.active_shift.as_mut().ok_or(AppError::NoActiveShift)
}

pub fn active(state: &AppState) -> AppResult<&ActiveShift> {
    state.active_shift.as_ref().ok_or(AppError::NoActiveShift)
}
