use crate::core::ids::unique_id;
use crate::core::shift::active_mut;
use crate::errors::{AppError, AppResult};
use crate::models::Millis;
use crate::models::entries::IthIntervention;
use crate::models::shift::ActiveShift;
use crate::models::state::AppState;

/// Minimum gap between two interventions on the same loom.
pub const ITH_COOLDOWN_MS: Millis = 60_000;

/// Whole seconds still to wait before `loom_id` accepts another ITH,
/// or `None` when it may be logged now.
pub fn cooldown_remaining(shift: &ActiveShift, loom_id: &str, now: Millis) -> Option<i64> {
    let last = shift.ith_for(loom_id).map(|i| i.timestamp).max()?;
    let elapsed = now - last;
    if elapsed < ITH_COOLDOWN_MS {
        let remaining_ms = ITH_COOLDOWN_MS - elapsed;
        Some((remaining_ms + 999) / 1000)
    } else {
        None
    }
}

pub struct IthLogic;

impl IthLogic {
    pub fn log(
        state: &mut AppState,
        loom_id: String,
        reason_id: String,
        now: Millis,
    ) -> AppResult<String> {
        let loom_code = state.loom_code(&loom_id);
        let shift = active_mut(state)?;

        if let Some(remaining_secs) = cooldown_remaining(shift, &loom_id, now) {
            return Err(AppError::IthCooldown {
                loom: loom_code,
                remaining_secs,
            });
        }

        let id = unique_id("ith", now, |id| {
            shift.ith_interventions.iter().any(|i| i.id == id)
        });

        shift.ith_interventions.push(IthIntervention {
            id: id.clone(),
            loom_id,
            reason_id,
            timestamp: now,
        });

        Ok(id)
    }

    /// Replace an intervention by id. Edits bypass the cooldown.
    pub fn update(state: &mut AppState, intervention: IthIntervention) -> AppResult<()> {
        let shift = active_mut(state)?;

        let slot = shift
            .ith_interventions
            .iter_mut()
            .find(|i| i.id == intervention.id)
            .ok_or_else(|| AppError::not_found("ITH intervention", intervention.id.clone()))?;

        *slot = intervention;
        Ok(())
    }

    pub fn delete(state: &mut AppState, id: &str) -> AppResult<()> {
        let shift = active_mut(state)?;

        let before = shift.ith_interventions.len();
        shift.ith_interventions.retain(|i| i.id != id);

        if shift.ith_interventions.len() == before {
            return Err(AppError::not_found("ITH intervention", id));
        }
        Ok(())
    }
}
