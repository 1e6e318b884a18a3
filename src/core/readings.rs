use crate::core::ids::unique_id;
use crate::core::shift::active_mut;
use crate::errors::{AppError, AppResult, ReadingError};
use crate::models::Millis;
use crate::models::entries::ProductionEntry;
use crate::models::shift::ActiveShift;
use crate::models::state::AppState;
use std::collections::HashMap;

/// One counter value typed for one loom.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingInput {
    pub loom_id: String,
    pub reading: f64,
}

/// Parse and check a batch of `(loom id, raw value)` pairs.
///
/// A value must be a non-negative number and must not be below the last
/// reading of its loom, counting earlier values of the same batch. Any
/// failure rejects the whole batch. Blank values are skipped.
pub fn validate_readings(
    shift: &ActiveShift,
    state: &AppState,
    raw: &[(String, String)],
) -> AppResult<Vec<ReadingInput>> {
    let mut errors = Vec::new();
    let mut inputs = Vec::new();
    let mut batch_last: HashMap<&str, f64> = HashMap::new();

    for (loom_id, value) in raw {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        let code = state.loom_code(loom_id);

        let reading = match value.replace(',', ".").parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => v,
            _ => {
                errors.push(ReadingError {
                    loom: code,
                    message: format!("invalid value \"{value}\""),
                });
                continue;
            }
        };

        let last = batch_last
            .get(loom_id.as_str())
            .copied()
            .or_else(|| shift.readings_for(loom_id).last().map(|p| p.reading));
        if let Some(last) = last
            && reading < last
        {
            errors.push(ReadingError {
                loom: code,
                message: format!("{reading} is below the last reading {last}"),
            });
            continue;
        }
        batch_last.insert(loom_id.as_str(), reading);

        inputs.push(ReadingInput {
            loom_id: loom_id.clone(),
            reading,
        });
    }

    if errors.is_empty() {
        Ok(inputs)
    } else {
        Err(AppError::InvalidReadings(errors))
    }
}

pub struct ReadingsLogic;

impl ReadingsLogic {
    /// Append a batch stamped with one instant. NaN and negative values are
    /// dropped; returns how many entries were stored.
    pub fn log(state: &mut AppState, inputs: Vec<ReadingInput>, now: Millis) -> AppResult<usize> {
        let shift = active_mut(state)?;

        let mut stored = 0;
        for input in inputs {
            if input.reading.is_nan() || input.reading < 0.0 {
                tracing::warn!(loom = %input.loom_id, reading = input.reading, "dropping invalid reading");
                continue;
            }

            let prefix = format!("prod-{}", input.loom_id);
            let id = unique_id(&prefix, now, |id| shift.production.iter().any(|p| p.id == id));

            shift.production.push(ProductionEntry {
                id,
                loom_id: input.loom_id,
                reading: input.reading,
                timestamp: now,
                notes: None,
            });
            stored += 1;
        }

        Ok(stored)
    }

    pub fn update(state: &mut AppState, entry: ProductionEntry) -> AppResult<()> {
        let shift = active_mut(state)?;

        let slot = shift
            .production
            .iter_mut()
            .find(|p| p.id == entry.id)
            .ok_or_else(|| AppError::not_found("Production entry", entry.id.clone()))?;

        *slot = entry;
        Ok(())
    }

    pub fn delete(state: &mut AppState, id: &str) -> AppResult<()> {
        let shift = active_mut(state)?;

        let entry = shift
            .production
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found("Production entry", id))?;

        if entry.is_baseline() {
            return Err(AppError::BaselineEntryLocked);
        }

        shift.production.retain(|p| p.id != id);
        Ok(())
    }
}
