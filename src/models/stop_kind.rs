use serde::{Deserialize, Serialize};
use std::fmt;

/// Which stop log a stop belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StopKind {
    Maintenance,
    Operational,
}

impl StopKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StopKind::Maintenance => "maintenance",
            StopKind::Operational => "operational",
        }
    }

    /// Prefix used when generating stop ids.
    pub fn id_prefix(&self) -> &'static str {
        self.as_str()
    }

    pub fn label(&self) -> &'static str {
        match self {
            StopKind::Maintenance => "Maintenance",
            StopKind::Operational => "Operational",
        }
    }
}

impl fmt::Display for StopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
