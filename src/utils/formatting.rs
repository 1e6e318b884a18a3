//! Number formatting for dashboards and reports.

pub fn fmt_meters(m: f64) -> String {
    format!("{:.0} m", m)
}

pub fn fmt_kg(kg: f64) -> String {
    format!("{:.1} kg", kg)
}

pub fn fmt_pct(p: f64) -> String {
    format!("{:.1}%", p)
}

/// Signed difference, e.g. "+12 m" / "-30 m".
pub fn fmt_signed_meters(m: f64) -> String {
    if m >= 0.0 {
        format!("+{:.0} m", m)
    } else {
        format!("{:.0} m", m)
    }
}

pub fn or_dash(s: Option<&str>) -> String {
    match s {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}
