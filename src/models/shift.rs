use super::Millis;
use super::entries::{IthIntervention, ProductionEntry, QualityEntry, Stop};
use super::stop_kind::StopKind;
use serde::{Deserialize, Serialize};

/// The single open shift and its event logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveShift {
    pub shift_name: String,
    /// Start of the configured shift window.
    pub shift_start_time: Millis,
    /// Wall-clock instant the shift was opened.
    pub user_start_time: Millis,
    pub responsible: String,
    pub recorder: String,
    #[serde(default)]
    pub production: Vec<ProductionEntry>,
    #[serde(default)]
    pub maintenance: Vec<Stop>,
    #[serde(default)]
    pub interventions: Vec<Stop>,
    #[serde(default)]
    pub quality_entries: Vec<QualityEntry>,
    #[serde(default)]
    pub ith_interventions: Vec<IthIntervention>,
}

impl ActiveShift {
    pub fn stops(&self, kind: StopKind) -> &Vec<Stop> {
        match kind {
            StopKind::Maintenance => &self.maintenance,
            StopKind::Operational => &self.interventions,
        }
    }

    pub fn stops_mut(&mut self, kind: StopKind) -> &mut Vec<Stop> {
        match kind {
            StopKind::Maintenance => &mut self.maintenance,
            StopKind::Operational => &mut self.interventions,
        }
    }

    /// Readings of one loom sorted by timestamp.
    pub fn readings_for(&self, loom_id: &str) -> Vec<&ProductionEntry> {
        let mut entries: Vec<&ProductionEntry> = self
            .production
            .iter()
            .filter(|p| p.loom_id == loom_id)
            .collect();
        entries.sort_by_key(|p| p.timestamp);
        entries
    }

    /// Maintenance and operational stops of one loom.
    pub fn stops_for(&self, loom_id: &str) -> impl Iterator<Item = &Stop> {
        self.maintenance
            .iter()
            .chain(self.interventions.iter())
            .filter(move |s| s.loom_id == loom_id)
    }

    pub fn active_stop(&self, loom_id: &str, kind: StopKind) -> Option<&Stop> {
        self.stops(kind)
            .iter()
            .find(|s| s.loom_id == loom_id && s.is_active())
    }

    pub fn ith_for(&self, loom_id: &str) -> impl Iterator<Item = &IthIntervention> {
        self.ith_interventions
            .iter()
            .filter(move |i| i.loom_id == loom_id)
    }

    pub fn off_spec_meters_for(&self, loom_id: &str) -> f64 {
        self.quality_entries
            .iter()
            .filter(|q| q.loom_id == loom_id)
            .map(|q| q.off_spec_fabric_meters)
            .sum()
    }
}

/// A closed shift. Never modified once appended to the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftRecord {
    #[serde(flatten)]
    pub shift: ActiveShift,
    pub end: Millis,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub action_plans: String,
}
