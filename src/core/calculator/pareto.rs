//! Pareto ranking of stop causes.
//!
//! Ties on the measure are broken by label in lexical order, so the ranking
//! does not depend on the order records were logged in.

use crate::models::Millis;
use crate::models::entries::{IthIntervention, Stop};
use crate::models::settings::Settings;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParetoItem {
    pub label: String,
    pub value: f64,
    pub percentage: f64,
    pub cumulative: f64,
}

/// Group `(label, measure)` pairs, rank them descending and attach the
/// running cumulative percentage.
pub fn rank<I>(values: I) -> Vec<ParetoItem>
where
    I: IntoIterator<Item = (String, f64)>,
{
    let mut grouped: BTreeMap<String, f64> = BTreeMap::new();
    for (label, value) in values {
        *grouped.entry(label).or_insert(0.0) += value;
    }

    let mut sorted: Vec<(String, f64)> = grouped.into_iter().collect();
    sorted.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    let total: f64 = sorted.iter().map(|(_, v)| v).sum();

    let mut cumulative = 0.0;
    sorted
        .into_iter()
        .map(|(label, value)| {
            let percentage = if total > 0.0 {
                value / total * 100.0
            } else {
                0.0
            };
            cumulative += percentage;
            ParetoItem {
                label,
                value,
                percentage,
                cumulative,
            }
        })
        .collect()
}

/// Downtime minutes per stop reason. Open stops run until `as_of`.
pub fn stop_pareto<'a, I>(stops: I, as_of: Millis) -> Vec<ParetoItem>
where
    I: IntoIterator<Item = &'a Stop>,
{
    rank(
        stops
            .into_iter()
            .map(|s| (s.reason.clone(), s.duration_ms(as_of) as f64 / 60_000.0)),
    )
}

/// Occurrences per ITH reason, labelled "<code> - <description>".
pub fn ith_pareto<'a, I>(interventions: I, settings: &Settings) -> Vec<ParetoItem>
where
    I: IntoIterator<Item = &'a IthIntervention>,
{
    rank(interventions.into_iter().map(|i| {
        (settings.ith_reason_label(&i.reason_id), 1.0)
    }))
}

/// Top `n` labels by occurrence count.
pub fn top_counts<I>(labels: I, n: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = String>,
{
    rank(labels.into_iter().map(|l| (l, 1.0)))
        .into_iter()
        .take(n)
        .map(|item| (item.label, item.value as usize))
        .collect()
}
