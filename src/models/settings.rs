use serde::{Deserialize, Serialize};

/// Recurring shift window, times as "HH:mm".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftTime {
    pub name: String,
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StopReasons {
    pub maintenance: Vec<String>,
    pub operational: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IthReason {
    pub id: String,
    pub code: String,
    pub description: String,
}

impl IthReason {
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.description)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub company_name: String,
    /// base64 data url
    #[serde(default)]
    pub company_logo: String,
    /// %
    pub efficiency_goal: f64,
    /// m/h, used when the product cannot provide a goal
    pub hourly_production_goal: f64,
    pub shifts: Vec<ShiftTime>,
    #[serde(default)]
    pub stop_reasons: StopReasons,
    #[serde(default)]
    pub ith_stop_reasons: Vec<IthReason>,
}

/// Label shown for an intervention whose reason no longer exists.
pub const UNKNOWN_ITH_REASON: &str = "ITH Desc.";

impl Settings {
    pub fn ith_reason(&self, id: &str) -> Option<&IthReason> {
        self.ith_stop_reasons.iter().find(|r| r.id == id)
    }

    /// `"<code> - <description>"`, or [`UNKNOWN_ITH_REASON`].
    pub fn ith_reason_label(&self, id: &str) -> String {
        self.ith_reason(id)
            .map(|r| r.label())
            .unwrap_or_else(|| UNKNOWN_ITH_REASON.to_string())
    }

    pub fn ith_reason_code(&self, id: &str) -> String {
        self.ith_reason(id)
            .map(|r| r.code.clone())
            .unwrap_or_else(|| UNKNOWN_ITH_REASON.to_string())
    }

    pub fn ith_reason_by_code(&self, code: &str) -> Option<&IthReason> {
        self.ith_stop_reasons
            .iter()
            .find(|r| r.code.eq_ignore_ascii_case(code))
    }
}
