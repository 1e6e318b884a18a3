use crate::core::ids::unique_id;
use crate::core::shift::active_mut;
use crate::errors::{AppError, AppResult};
use crate::models::Millis;
use crate::models::entries::QualityEntry;
use crate::models::state::AppState;

pub struct QualityLogic;

impl QualityLogic {
    pub fn log(
        state: &mut AppState,
        loom_id: String,
        residue_kg: f64,
        off_spec_fabric_meters: f64,
        notes: Option<String>,
        now: Millis,
    ) -> AppResult<String> {
        for (field, value) in [
            ("residue", residue_kg),
            ("off-spec metres", off_spec_fabric_meters),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::InvalidValue(format!("{field}: {value}")));
            }
        }

        let shift = active_mut(state)?;
        let id = unique_id("qual", now, |id| {
            shift.quality_entries.iter().any(|q| q.id == id)
        });

        shift.quality_entries.push(QualityEntry {
            id: id.clone(),
            loom_id,
            timestamp: now,
            residue_kg,
            off_spec_fabric_meters,
            notes: notes.filter(|n| !n.trim().is_empty()),
        });

        Ok(id)
    }
}
