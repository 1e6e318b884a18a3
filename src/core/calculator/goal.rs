use crate::models::catalog::Product;
use crate::models::settings::Settings;

/// Goal derived from the product alone: `(rpm * 60) / (density * 10)` m/h.
/// `None` when the product has no usable thread density.
pub fn product_goal(product: &Product) -> Option<f64> {
    if product.thread_density > 0.0 {
        Some((product.standard_rpm * 60.0) / (product.thread_density * 10.0))
    } else {
        None
    }
}

/// Hourly metre goal of a loom, falling back to the configured goal.
pub fn hourly_goal(product: Option<&Product>, settings: &Settings) -> f64 {
    product
        .and_then(product_goal)
        .unwrap_or(settings.hourly_production_goal)
}

/// Fabric mass in kg: `meters * width_m * grammage_g_m2 / 1000`.
pub fn to_kg(meters: f64, product: Option<&Product>) -> f64 {
    match product {
        Some(p) => meters * p.fabric_width_m * p.grammage_m2 / 1000.0,
        None => 0.0,
    }
}

/// Metres lost to one ITH, costed as one minute at goal rate.
pub fn ith_loss_per_intervention(goal: f64) -> f64 {
    goal / 60.0
}
