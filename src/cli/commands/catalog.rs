//! Operators, products, looms, stop reasons and ITH reasons.

use crate::cli::commands::{resolve_loom, split_pair};
use crate::cli::parser::{
    IthReasonAction, LoomAction, OperatorAction, OperatorFields, ProductAction, ProductFields,
    ReasonAction,
};
use crate::core::calculator::goal::product_goal;
use crate::core::reducer::Action;
use crate::core::store::Store;
use crate::errors::{AppError, AppResult};
use crate::models::Millis;
use crate::models::catalog::{Loom, Operator, Product};
use crate::models::state::AppState;
use crate::models::stop_kind::StopKind;
use crate::ui::messages::{info, success};
use crate::utils::formatting::or_dash;
use crate::utils::table::Table;
use std::collections::BTreeMap;

// ---------------------------
// Operators
// ---------------------------

fn apply_operator_fields(operator: &mut Operator, fields: &OperatorFields) {
    if let Some(v) = &fields.name {
        operator.name = v.trim().to_string();
    }
    if let Some(v) = &fields.employee_id {
        operator.employee_id = v.trim().to_string();
    }
    if let Some(v) = &fields.role {
        operator.role = v.trim().to_string();
    }
    if let Some(v) = &fields.shift {
        operator.shift_name = v.trim().to_string();
    }
}

pub fn operator(action: &OperatorAction, store: &mut Store, now: Millis) -> AppResult<()> {
    match action {
        OperatorAction::Add { fields } => {
            let mut operator = Operator {
                id: String::new(),
                name: String::new(),
                employee_id: String::new(),
                role: String::new(),
                shift_name: String::new(),
            };
            apply_operator_fields(&mut operator, fields);
            let name = operator.name.clone();
            store.dispatch(Action::AddOperator(operator), now)?;
            success(format!("Operator {name} added."));
        }
        OperatorAction::Edit { id, fields } => {
            let mut operator = store
                .state()
                .operator(id)
                .cloned()
                .ok_or_else(|| AppError::not_found("Operator", id.clone()))?;
            apply_operator_fields(&mut operator, fields);
            store.dispatch(Action::UpdateOperator(operator), now)?;
            success(format!("Operator {id} updated."));
        }
        OperatorAction::Del { id } => {
            store.dispatch(Action::DeleteOperator(id.clone()), now)?;
            success(format!("Operator {id} deleted."));
        }
        OperatorAction::List => {
            let state = store.state();
            if state.operators.is_empty() {
                info("No operators.");
                return Ok(());
            }
            let mut table = Table::new(&["ID", "Name", "Employee ID", "Role", "Shift"]);
            for o in &state.operators {
                table.add_row(vec![
                    o.id.clone(),
                    o.name.clone(),
                    or_dash(Some(o.employee_id.as_str())),
                    or_dash(Some(o.role.as_str())),
                    or_dash(Some(o.shift_name.as_str())),
                ]);
            }
            print!("{}", table.render());
        }
    }
    Ok(())
}

// ---------------------------
// Products
// ---------------------------

fn apply_product_fields(product: &mut Product, fields: &ProductFields) {
    if let Some(v) = &fields.name {
        product.name = v.trim().to_string();
    }
    if let Some(v) = &fields.code {
        product.product_code = v.trim().to_string();
    }
    if let Some(v) = fields.rpm {
        product.standard_rpm = v;
    }
    if let Some(v) = fields.density {
        product.thread_density = v;
    }
    if let Some(v) = fields.grammage {
        product.grammage_m2 = v;
    }
    if let Some(v) = fields.width {
        product.fabric_width_m = v;
    }
    if let Some(v) = fields.weft_dtex {
        product.composition.weft.dtex = v;
    }
    if let Some(v) = &fields.weft_color {
        product.composition.weft.color = v.clone();
    }
    if let Some(v) = fields.warp_dtex {
        product.composition.warp.dtex = v;
    }
    if let Some(v) = &fields.warp_color {
        product.composition.warp.color = v.clone();
    }
}

fn check_product_numbers(product: &Product) -> AppResult<()> {
    for (field, value) in [
        ("rpm", product.standard_rpm),
        ("density", product.thread_density),
        ("grammage", product.grammage_m2),
        ("width", product.fabric_width_m),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(AppError::InvalidValue(format!("{field}: {value}")));
        }
    }
    Ok(())
}

pub fn product(action: &ProductAction, store: &mut Store, now: Millis) -> AppResult<()> {
    match action {
        ProductAction::Add { fields } => {
            let mut product = Product {
                id: String::new(),
                name: String::new(),
                product_code: String::new(),
                standard_rpm: 0.0,
                thread_density: 0.0,
                grammage_m2: 0.0,
                fabric_width_m: 0.0,
                composition: Default::default(),
            };
            apply_product_fields(&mut product, fields);
            check_product_numbers(&product)?;
            let name = product.name.clone();
            store.dispatch(Action::AddProduct(product), now)?;
            success(format!("Product {name} added."));
        }
        ProductAction::Edit { id, fields } => {
            let mut product = store
                .state()
                .product(id)
                .cloned()
                .ok_or_else(|| AppError::not_found("Product", id.clone()))?;
            apply_product_fields(&mut product, fields);
            check_product_numbers(&product)?;
            store.dispatch(Action::UpdateProduct(product), now)?;
            success(format!("Product {id} updated."));
        }
        ProductAction::Del { id } => {
            store.dispatch(Action::DeleteProduct(id.clone()), now)?;
            success(format!("Product {id} deleted."));
        }
        ProductAction::List => {
            let state = store.state();
            if state.products.is_empty() {
                info("No products.");
                return Ok(());
            }
            let mut table = Table::new(&[
                "ID", "Name", "Code", "RPM", "Density", "g/m²", "Width (m)", "Goal (m/h)",
            ]);
            for p in &state.products {
                let goal = product_goal(p)
                    .map(|g| format!("{g:.1}"))
                    .unwrap_or_else(|| "-".to_string());
                table.add_row(vec![
                    p.id.clone(),
                    p.name.clone(),
                    or_dash(Some(p.product_code.as_str())),
                    format!("{:.0}", p.standard_rpm),
                    format!("{:.0}", p.thread_density),
                    format!("{:.0}", p.grammage_m2),
                    format!("{:.2}", p.fabric_width_m),
                    goal,
                ]);
            }
            print!("{}", table.render());
        }
    }
    Ok(())
}

// ---------------------------
// Looms
// ---------------------------

fn require_product(state: &AppState, id: &str) -> AppResult<()> {
    match state.product(id) {
        Some(_) => Ok(()),
        None => Err(AppError::not_found("Product", id)),
    }
}

fn require_shift_name(state: &AppState, name: &str) -> AppResult<()> {
    if state.settings.shifts.iter().any(|s| s.name == name) {
        Ok(())
    } else {
        Err(AppError::not_found("Shift", name))
    }
}

pub fn loom(action: &LoomAction, store: &mut Store, now: Millis) -> AppResult<()> {
    match action {
        LoomAction::Add {
            code,
            sector,
            product,
        } => {
            require_product(store.state(), product)?;
            let loom = Loom {
                id: String::new(),
                code: code.trim().to_string(),
                sector: sector.trim().to_string(),
                operator_ids: BTreeMap::new(),
                product_id: product.clone(),
            };
            store.dispatch(Action::AddLoom(loom), now)?;
            success(format!("Loom {} added.", code.trim()));
        }
        LoomAction::Set {
            loom,
            code,
            sector,
            product,
            operators,
            unassign,
        } => {
            let state = store.state();
            let mut updated = resolve_loom(state, loom)?.clone();

            if let Some(c) = code {
                let clash = state
                    .looms
                    .iter()
                    .any(|l| l.id != updated.id && l.code.eq_ignore_ascii_case(c.trim()));
                if clash {
                    return Err(AppError::InvalidValue(format!(
                        "loom code {} already exists",
                        c.trim()
                    )));
                }
                updated.code = c.trim().to_string();
            }
            if let Some(s) = sector {
                updated.sector = s.trim().to_string();
            }
            if let Some(p) = product {
                require_product(state, p)?;
                updated.product_id = p.clone();
            }
            for pair in operators {
                let (shift, operator_id) = split_pair(pair)?;
                require_shift_name(state, shift)?;
                if state.operator(operator_id).is_none() {
                    return Err(AppError::not_found("Operator", operator_id));
                }
                updated
                    .operator_ids
                    .insert(shift.to_string(), operator_id.to_string());
            }
            for shift in unassign {
                updated.operator_ids.remove(shift.trim());
            }

            let code = updated.code.clone();
            store.dispatch(Action::UpdateLoom(updated), now)?;
            success(format!("Loom {code} updated."));
        }
        LoomAction::Del { loom } => {
            let target = resolve_loom(store.state(), loom)?;
            let (id, code) = (target.id.clone(), target.code.clone());
            store.dispatch(Action::RemoveLoom(id), now)?;
            success(format!("Loom {code} removed."));
        }
        LoomAction::List => {
            let state = store.state();
            if state.looms.is_empty() {
                info("No looms.");
                return Ok(());
            }
            let mut table = Table::new(&["ID", "Code", "Sector", "Product", "Operators"]);
            for l in &state.looms {
                let operators: Vec<String> = l
                    .operator_ids
                    .iter()
                    .map(|(shift, id)| {
                        let name = state
                            .operator(id)
                            .map(|o| o.name.as_str())
                            .unwrap_or("N/A");
                        format!("{shift}: {name}")
                    })
                    .collect();
                table.add_row(vec![
                    l.id.clone(),
                    l.code.clone(),
                    or_dash(Some(l.sector.as_str())),
                    state
                        .product_of(l)
                        .map(|p| p.name.clone())
                        .unwrap_or_else(|| "N/A".to_string()),
                    or_dash(Some(operators.join(", ").as_str())),
                ]);
            }
            print!("{}", table.render());
        }
    }
    Ok(())
}

// ---------------------------
// Stop reasons
// ---------------------------

pub fn reason(action: &ReasonAction, store: &mut Store, now: Millis) -> AppResult<()> {
    match action {
        ReasonAction::Add { kind, reason } => {
            if reason.trim().is_empty() {
                info("Empty reason ignored.");
                return Ok(());
            }
            store.dispatch(
                Action::AddStopReason {
                    kind: *kind,
                    reason: reason.clone(),
                },
                now,
            )?;
            success(format!("{} reason \"{}\" added.", kind.label(), reason.trim()));
        }
        ReasonAction::List => {
            let reasons = &store.state().settings.stop_reasons;
            for (kind, list) in [
                (StopKind::Maintenance, &reasons.maintenance),
                (StopKind::Operational, &reasons.operational),
            ] {
                println!("{}:", kind.label());
                if list.is_empty() {
                    println!("  -");
                }
                for r in list {
                    println!("  • {r}");
                }
            }
        }
    }
    Ok(())
}

// ---------------------------
// ITH reasons
// ---------------------------

pub fn ith_reason(action: &IthReasonAction, store: &mut Store, now: Millis) -> AppResult<()> {
    match action {
        IthReasonAction::Add { code, description } => {
            store.dispatch(
                Action::AddIthReason {
                    code: code.clone(),
                    description: description.clone(),
                },
                now,
            )?;
            success(format!("ITH reason {} added.", code.trim()));
        }
        IthReasonAction::Edit {
            id,
            code,
            description,
        } => {
            let mut reason = store
                .state()
                .settings
                .ith_reason(id)
                .cloned()
                .ok_or_else(|| AppError::not_found("ITH reason", id.clone()))?;
            if let Some(c) = code {
                reason.code = c.trim().to_string();
            }
            if let Some(d) = description {
                reason.description = d.trim().to_string();
            }
            store.dispatch(Action::UpdateIthReason(reason), now)?;
            success(format!("ITH reason {id} updated."));
        }
        IthReasonAction::Del { id } => {
            store.dispatch(Action::DeleteIthReason(id.clone()), now)?;
            success(format!("ITH reason {id} deleted."));
        }
        IthReasonAction::List => {
            let reasons = &store.state().settings.ith_stop_reasons;
            if reasons.is_empty() {
                info("No ITH reasons.");
                return Ok(());
            }
            let mut table = Table::new(&["ID", "Code", "Description"]);
            for r in reasons {
                table.add_row(vec![r.id.clone(), r.code.clone(), r.description.clone()]);
            }
            print!("{}", table.render());
        }
    }
    Ok(())
}
