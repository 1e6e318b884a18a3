//! Reference data maintenance: operators, products, looms, stop and ITH
//! reasons, settings and shift windows.

use crate::core::ids::unique_id;
use crate::errors::{AppError, AppResult};
use crate::models::Millis;
use crate::models::catalog::{Loom, Operator, Product};
use crate::models::settings::{IthReason, Settings, ShiftTime};
use crate::models::state::AppState;
use crate::models::stop_kind::StopKind;
use crate::utils::time::parse_time_strict;

pub struct CatalogLogic;

/// Replace the element with the same id, or fail with `NotFound`.
fn replace_by_id<T, F>(items: &mut [T], item: T, kind: &'static str, id_of: F) -> AppResult<()>
where
    F: Fn(&T) -> &str,
{
    let id = id_of(&item).to_string();
    let slot = items
        .iter_mut()
        .find(|i| id_of(i) == id)
        .ok_or_else(|| AppError::not_found(kind, id.clone()))?;
    *slot = item;
    Ok(())
}

fn remove_by_id<T, F>(items: &mut Vec<T>, id: &str, kind: &'static str, id_of: F) -> AppResult<()>
where
    F: Fn(&T) -> &str,
{
    let before = items.len();
    items.retain(|i| id_of(i) != id);
    if items.len() == before {
        return Err(AppError::not_found(kind, id));
    }
    Ok(())
}

fn require(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::MissingField(field.to_string()));
    }
    Ok(())
}

impl CatalogLogic {
    // ---------------------------
    // Operators
    // ---------------------------

    pub fn add_operator(state: &mut AppState, mut operator: Operator, now: Millis) -> AppResult<String> {
        require(&operator.name, "name")?;
        if operator.id.is_empty() {
            operator.id = unique_id("op", now, |id| state.operator(id).is_some());
        }
        let id = operator.id.clone();
        state.operators.push(operator);
        Ok(id)
    }

    pub fn update_operator(state: &mut AppState, operator: Operator) -> AppResult<()> {
        require(&operator.name, "name")?;
        replace_by_id(&mut state.operators, operator, "Operator", |o| o.id.as_str())
    }

    /// Loom assignments pointing at the operator are dropped with it.
    pub fn delete_operator(state: &mut AppState, id: &str) -> AppResult<()> {
        remove_by_id(&mut state.operators, id, "Operator", |o| o.id.as_str())?;
        for loom in &mut state.looms {
            loom.operator_ids.retain(|_, op| op.as_str() != id);
        }
        Ok(())
    }

    // ---------------------------
    // Products
    // ---------------------------

    pub fn add_product(state: &mut AppState, mut product: Product, now: Millis) -> AppResult<String> {
        require(&product.name, "name")?;
        if product.id.is_empty() {
            product.id = unique_id("product", now, |id| state.product(id).is_some());
        }
        let id = product.id.clone();
        state.products.push(product);
        Ok(id)
    }

    pub fn update_product(state: &mut AppState, product: Product) -> AppResult<()> {
        require(&product.name, "name")?;
        replace_by_id(&mut state.products, product, "Product", |p| p.id.as_str())
    }

    /// Looms keep a dangling product id; their goal then falls back to the
    /// configured hourly goal.
    pub fn delete_product(state: &mut AppState, id: &str) -> AppResult<()> {
        remove_by_id(&mut state.products, id, "Product", |p| p.id.as_str())
    }

    // ---------------------------
    // Looms
    // ---------------------------

    pub fn add_loom(state: &mut AppState, mut loom: Loom, now: Millis) -> AppResult<String> {
        require(&loom.code, "code")?;
        if state.looms.iter().any(|l| l.code.eq_ignore_ascii_case(&loom.code)) {
            return Err(AppError::InvalidValue(format!(
                "loom code {} already exists",
                loom.code
            )));
        }
        if loom.id.is_empty() {
            loom.id = unique_id("LOOM", now, |id| state.loom(id).is_some());
        }
        let id = loom.id.clone();
        state.looms.push(loom);
        Ok(id)
    }

    pub fn update_loom(state: &mut AppState, loom: Loom) -> AppResult<()> {
        require(&loom.code, "code")?;
        replace_by_id(&mut state.looms, loom, "Loom", |l| l.id.as_str())
    }

    pub fn remove_loom(state: &mut AppState, id: &str) -> AppResult<()> {
        remove_by_id(&mut state.looms, id, "Loom", |l| l.id.as_str())
    }

    // ---------------------------
    // Stop reasons
    // ---------------------------

    /// Trimmed; blank is ignored, an existing reason is rejected.
    pub fn add_stop_reason(state: &mut AppState, kind: StopKind, reason: &str) -> AppResult<bool> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Ok(false);
        }

        let reasons = match kind {
            StopKind::Maintenance => &mut state.settings.stop_reasons.maintenance,
            StopKind::Operational => &mut state.settings.stop_reasons.operational,
        };

        if reasons.iter().any(|r| r == reason) {
            return Err(AppError::DuplicateReason(reason.to_string()));
        }

        reasons.push(reason.to_string());
        Ok(true)
    }

    // ---------------------------
    // ITH reasons
    // ---------------------------

    pub fn add_ith_reason(
        state: &mut AppState,
        code: &str,
        description: &str,
        now: Millis,
    ) -> AppResult<String> {
        let code = code.trim();
        require(code, "code")?;
        require(description, "description")?;

        if state.settings.ith_reason_by_code(code).is_some() {
            return Err(AppError::DuplicateIthCode(code.to_string()));
        }

        let id = unique_id("ith-reason", now, |id| state.settings.ith_reason(id).is_some());
        state.settings.ith_stop_reasons.push(IthReason {
            id: id.clone(),
            code: code.to_string(),
            description: description.trim().to_string(),
        });
        Ok(id)
    }

    pub fn update_ith_reason(state: &mut AppState, reason: IthReason) -> AppResult<()> {
        require(&reason.code, "code")?;
        let clash = state
            .settings
            .ith_stop_reasons
            .iter()
            .any(|r| r.id != reason.id && r.code.eq_ignore_ascii_case(&reason.code));
        if clash {
            return Err(AppError::DuplicateIthCode(reason.code));
        }
        replace_by_id(&mut state.settings.ith_stop_reasons, reason, "ITH reason", |r| r.id.as_str())
    }

    /// Past interventions keep the id and show up as unknown reasons.
    pub fn delete_ith_reason(state: &mut AppState, id: &str) -> AppResult<()> {
        remove_by_id(&mut state.settings.ith_stop_reasons, id, "ITH reason", |r| r.id.as_str())
    }

    // ---------------------------
    // Settings
    // ---------------------------

    pub fn update_settings(state: &mut AppState, settings: Settings) -> AppResult<()> {
        if !settings.efficiency_goal.is_finite() || settings.efficiency_goal < 0.0 {
            return Err(AppError::InvalidValue(format!(
                "efficiency goal {}",
                settings.efficiency_goal
            )));
        }
        if !settings.hourly_production_goal.is_finite() || settings.hourly_production_goal < 0.0 {
            return Err(AppError::InvalidValue(format!(
                "hourly goal {}",
                settings.hourly_production_goal
            )));
        }
        state.settings = settings;
        Ok(())
    }

    /// Add a shift window or replace the one with the same name.
    pub fn set_shift_window(state: &mut AppState, window: ShiftTime) -> AppResult<()> {
        require(&window.name, "name")?;
        parse_time_strict(&window.start)?;
        parse_time_strict(&window.end)?;

        match state
            .settings
            .shifts
            .iter_mut()
            .find(|s| s.name == window.name)
        {
            Some(slot) => *slot = window,
            None => state.settings.shifts.push(window),
        }
        Ok(())
    }

    pub fn remove_shift_window(state: &mut AppState, name: &str) -> AppResult<()> {
        remove_by_id(&mut state.settings.shifts, name, "Shift", |s| s.name.as_str())
    }
}
