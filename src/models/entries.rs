use super::{BASELINE_NOTE, Millis};
use serde::{Deserialize, Serialize};

/// Cumulative meter counter reading of one loom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionEntry {
    pub id: String,
    pub loom_id: String,
    pub reading: f64,
    pub timestamp: Millis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ProductionEntry {
    pub fn is_baseline(&self) -> bool {
        self.notes.as_deref() == Some(BASELINE_NOTE)
    }
}

/// Maintenance stop or operational intervention. `end == None` means active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub id: String,
    pub loom_id: String,
    pub start: Millis,
    pub end: Option<Millis>,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Stop {
    pub fn is_active(&self) -> bool {
        self.end.is_none()
    }

    /// Duration up to `as_of` for open stops; inverted stops count as zero.
    pub fn duration_ms(&self, as_of: Millis) -> Millis {
        let end = self.end.unwrap_or(as_of);
        (end - self.start).max(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityEntry {
    pub id: String,
    pub loom_id: String,
    pub timestamp: Millis,
    pub residue_kg: f64,
    pub off_spec_fabric_meters: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Micro-stop (ITH). Costed as one minute of goal-rate production.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IthIntervention {
    pub id: String,
    pub loom_id: String,
    pub reason_id: String,
    pub timestamp: Millis,
}
