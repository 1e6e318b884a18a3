use crate::models::entries::ProductionEntry;
use crate::utils::time::{hour_label, hour_of};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourBucket {
    pub hour: u32,
    pub label: String,
    pub production: f64,
}

/// Production per local clock hour.
///
/// The delta between two consecutive readings is attributed wholly to the
/// hour of the later reading, even when the interval spans several hours.
/// Negative deltas count as zero. Buckets come out in order of first
/// appearance, which is chronological for a single shift.
pub fn hourly_production(entries: &[&ProductionEntry]) -> Vec<HourBucket> {
    let mut sorted: Vec<&ProductionEntry> = entries.to_vec();
    sorted.sort_by_key(|e| e.timestamp);

    let mut buckets: Vec<HourBucket> = Vec::new();

    for pair in sorted.windows(2) {
        let delta = (pair[1].reading - pair[0].reading).max(0.0);
        let hour = hour_of(pair[1].timestamp);

        match buckets.iter_mut().find(|b| b.hour == hour) {
            Some(bucket) => bucket.production += delta,
            None => buckets.push(HourBucket {
                hour,
                label: hour_label(hour),
                production: delta,
            }),
        }
    }

    buckets
}
