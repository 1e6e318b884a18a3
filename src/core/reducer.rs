//! Every mutation of the application document goes through [`reduce`].
//!
//! The reducer works on a copy of the current snapshot: a rejected action
//! returns an error and the caller keeps the old snapshot untouched.

use crate::core::catalog::CatalogLogic;
use crate::core::ith::IthLogic;
use crate::core::quality::QualityLogic;
use crate::core::readings::{ReadingInput, ReadingsLogic};
use crate::core::shift::ShiftLogic;
use crate::core::stops::StopsLogic;
use crate::errors::AppResult;
use crate::models::Millis;
use crate::models::catalog::{Loom, Operator, Product};
use crate::models::entries::{IthIntervention, ProductionEntry};
use crate::models::settings::{IthReason, Settings, ShiftTime};
use crate::models::state::AppState;
use crate::models::stop_kind::StopKind;

#[derive(Debug, Clone)]
pub enum Action {
    StartShift {
        responsible: String,
        recorder: String,
    },
    EndShift {
        summary: String,
        action_plans: String,
    },

    LogReadings(Vec<ReadingInput>),
    UpdateProductionEntry(ProductionEntry),
    DeleteProductionEntry(String),

    StartStop {
        loom_id: String,
        kind: StopKind,
        reason: String,
        notes: Option<String>,
    },
    EndStop {
        stop_id: String,
        kind: StopKind,
    },

    LogQuality {
        loom_id: String,
        residue_kg: f64,
        off_spec_fabric_meters: f64,
        notes: Option<String>,
    },

    LogIth {
        loom_id: String,
        reason_id: String,
    },
    UpdateIth(IthIntervention),
    DeleteIth(String),

    AddOperator(Operator),
    UpdateOperator(Operator),
    DeleteOperator(String),

    AddProduct(Product),
    UpdateProduct(Product),
    DeleteProduct(String),

    AddLoom(Loom),
    UpdateLoom(Loom),
    RemoveLoom(String),

    AddStopReason {
        kind: StopKind,
        reason: String,
    },
    AddIthReason {
        code: String,
        description: String,
    },
    UpdateIthReason(IthReason),
    DeleteIthReason(String),

    UpdateSettings(Settings),
    SetShiftWindow(ShiftTime),
    RemoveShiftWindow(String),

    /// Replace the whole document (import, file sync).
    Restore(Box<AppState>),
}

impl Action {
    /// Operation name written to the audit log.
    pub fn operation(&self) -> &'static str {
        match self {
            Action::StartShift { .. } => "shift_start",
            Action::EndShift { .. } => "shift_end",
            Action::LogReadings(_) => "reading_log",
            Action::UpdateProductionEntry(_) => "reading_edit",
            Action::DeleteProductionEntry(_) => "reading_del",
            Action::StartStop { .. } => "stop_start",
            Action::EndStop { .. } => "stop_end",
            Action::LogQuality { .. } => "quality_add",
            Action::LogIth { .. } => "ith_add",
            Action::UpdateIth(_) => "ith_edit",
            Action::DeleteIth(_) => "ith_del",
            Action::AddOperator(_) => "operator_add",
            Action::UpdateOperator(_) => "operator_edit",
            Action::DeleteOperator(_) => "operator_del",
            Action::AddProduct(_) => "product_add",
            Action::UpdateProduct(_) => "product_edit",
            Action::DeleteProduct(_) => "product_del",
            Action::AddLoom(_) => "loom_add",
            Action::UpdateLoom(_) => "loom_edit",
            Action::RemoveLoom(_) => "loom_del",
            Action::AddStopReason { .. } => "reason_add",
            Action::AddIthReason { .. } => "ith_reason_add",
            Action::UpdateIthReason(_) => "ith_reason_edit",
            Action::DeleteIthReason(_) => "ith_reason_del",
            Action::UpdateSettings(_) => "settings_edit",
            Action::SetShiftWindow(_) => "shift_window_set",
            Action::RemoveShiftWindow(_) => "shift_window_del",
            Action::Restore(_) => "restore",
        }
    }

    /// Short description of what the action touches, for the audit log.
    pub fn target(&self) -> String {
        match self {
            Action::StartShift { responsible, .. } => responsible.clone(),
            Action::EndShift { .. } => String::new(),
            Action::LogReadings(inputs) => format!("{} reading(s)", inputs.len()),
            Action::UpdateProductionEntry(e) => e.id.clone(),
            Action::DeleteProductionEntry(id) => id.clone(),
            Action::StartStop { loom_id, kind, .. } => format!("{loom_id} {kind}"),
            Action::EndStop { stop_id, .. } => stop_id.clone(),
            Action::LogQuality { loom_id, .. } => loom_id.clone(),
            Action::LogIth { loom_id, .. } => loom_id.clone(),
            Action::UpdateIth(i) => i.id.clone(),
            Action::DeleteIth(id) => id.clone(),
            Action::AddOperator(o) | Action::UpdateOperator(o) => o.name.clone(),
            Action::DeleteOperator(id) => id.clone(),
            Action::AddProduct(p) | Action::UpdateProduct(p) => p.name.clone(),
            Action::DeleteProduct(id) => id.clone(),
            Action::AddLoom(l) | Action::UpdateLoom(l) => l.code.clone(),
            Action::RemoveLoom(id) => id.clone(),
            Action::AddStopReason { kind, reason } => format!("{kind}: {reason}"),
            Action::AddIthReason { code, .. } => code.clone(),
            Action::UpdateIthReason(r) => r.code.clone(),
            Action::DeleteIthReason(id) => id.clone(),
            Action::UpdateSettings(_) => String::new(),
            Action::SetShiftWindow(s) => s.name.clone(),
            Action::RemoveShiftWindow(name) => name.clone(),
            Action::Restore(_) => String::new(),
        }
    }
}

/// Apply `action` at instant `now` and return the next snapshot.
pub fn reduce(state: &AppState, action: Action, now: Millis) -> AppResult<AppState> {
    if let Action::Restore(next) = action {
        return Ok(*next);
    }

    let mut next = state.clone();

    match action {
        Action::StartShift {
            responsible,
            recorder,
        } => ShiftLogic::start(&mut next, responsible, recorder, now)?,
        Action::EndShift {
            summary,
            action_plans,
        } => ShiftLogic::end(&mut next, summary, action_plans, now),

        Action::LogReadings(inputs) => {
            ReadingsLogic::log(&mut next, inputs, now)?;
        }
        Action::UpdateProductionEntry(entry) => ReadingsLogic::update(&mut next, entry)?,
        Action::DeleteProductionEntry(id) => ReadingsLogic::delete(&mut next, &id)?,

        Action::StartStop {
            loom_id,
            kind,
            reason,
            notes,
        } => {
            StopsLogic::start(&mut next, loom_id, kind, reason, notes, now)?;
        }
        Action::EndStop { stop_id, kind } => StopsLogic::end(&mut next, &stop_id, kind, now)?,

        Action::LogQuality {
            loom_id,
            residue_kg,
            off_spec_fabric_meters,
            notes,
        } => {
            QualityLogic::log(
                &mut next,
                loom_id,
                residue_kg,
                off_spec_fabric_meters,
                notes,
                now,
            )?;
        }

        Action::LogIth { loom_id, reason_id } => {
            IthLogic::log(&mut next, loom_id, reason_id, now)?;
        }
        Action::UpdateIth(intervention) => IthLogic::update(&mut next, intervention)?,
        Action::DeleteIth(id) => IthLogic::delete(&mut next, &id)?,

        Action::AddOperator(operator) => {
            CatalogLogic::add_operator(&mut next, operator, now)?;
        }
        Action::UpdateOperator(operator) => CatalogLogic::update_operator(&mut next, operator)?,
        Action::DeleteOperator(id) => CatalogLogic::delete_operator(&mut next, &id)?,

        Action::AddProduct(product) => {
            CatalogLogic::add_product(&mut next, product, now)?;
        }
        Action::UpdateProduct(product) => CatalogLogic::update_product(&mut next, product)?,
        Action::DeleteProduct(id) => CatalogLogic::delete_product(&mut next, &id)?,

        Action::AddLoom(loom) => {
            CatalogLogic::add_loom(&mut next, loom, now)?;
        }
        Action::UpdateLoom(loom) => CatalogLogic::update_loom(&mut next, loom)?,
        Action::RemoveLoom(id) => CatalogLogic::remove_loom(&mut next, &id)?,

        Action::AddStopReason { kind, reason } => {
            CatalogLogic::add_stop_reason(&mut next, kind, &reason)?;
        }
        Action::AddIthReason { code, description } => {
            CatalogLogic::add_ith_reason(&mut next, &code, &description, now)?;
        }
        Action::UpdateIthReason(reason) => CatalogLogic::update_ith_reason(&mut next, reason)?,
        Action::DeleteIthReason(id) => CatalogLogic::delete_ith_reason(&mut next, &id)?,

        Action::UpdateSettings(settings) => CatalogLogic::update_settings(&mut next, settings)?,
        Action::SetShiftWindow(window) => CatalogLogic::set_shift_window(&mut next, window)?,
        Action::RemoveShiftWindow(name) => CatalogLogic::remove_shift_window(&mut next, &name)?,

        // handled above
        Action::Restore(_) => {}
    }

    Ok(next)
}
