use crate::core::ids::unique_id;
use crate::core::shift::active_mut;
use crate::errors::{AppError, AppResult};
use crate::models::Millis;
use crate::models::entries::Stop;
use crate::models::shift::ActiveShift;
use crate::models::state::AppState;
use crate::models::stop_kind::StopKind;

pub struct StopsLogic;

impl StopsLogic {
    /// Open a stop on a loom. Returns the new stop id.
    pub fn start(
        state: &mut AppState,
        loom_id: String,
        kind: StopKind,
        reason: String,
        notes: Option<String>,
        now: Millis,
    ) -> AppResult<String> {
        let shift = active_mut(state)?;
        let log = shift.stops_mut(kind);

        let id = unique_id(kind.id_prefix(), now, |id| log.iter().any(|s| s.id == id));

        log.push(Stop {
            id: id.clone(),
            loom_id,
            start: now,
            end: None,
            reason,
            notes: notes.filter(|n| !n.trim().is_empty()),
        });

        Ok(id)
    }

    /// Close an active stop at `now`.
    pub fn end(state: &mut AppState, stop_id: &str, kind: StopKind, now: Millis) -> AppResult<()> {
        let shift = active_mut(state)?;

        let stop = shift
            .stops_mut(kind)
            .iter_mut()
            .find(|s| s.id == stop_id)
            .ok_or_else(|| AppError::not_found("Stop", stop_id))?;

        if !stop.is_active() {
            return Err(AppError::InvalidValue(format!(
                "stop {stop_id} has already ended"
            )));
        }

        stop.end = Some(now);
        Ok(())
    }
}

/// Refuse a second open stop of the same kind on one loom.
pub fn ensure_no_active_stop(
    shift: &ActiveShift,
    loom_id: &str,
    loom_code: &str,
    kind: StopKind,
) -> AppResult<()> {
    match shift.active_stop(loom_id, kind) {
        Some(_) => Err(AppError::StopAlreadyActive {
            loom: loom_code.to_string(),
            kind: kind.to_string(),
        }),
        None => Ok(()),
    }
}
