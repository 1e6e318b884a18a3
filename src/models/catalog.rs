use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub employee_id: String, // matricula
    #[serde(default)]
    pub role: String,
    /// Shift this operator usually works.
    pub shift_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FabricComponent {
    pub dtex: f64,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Composition {
    pub weft: FabricComponent,
    pub warp: FabricComponent,
    pub marking_warp: FabricComponent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub product_code: String,
    #[serde(default)]
    pub standard_rpm: f64,
    /// Threads per 10 cm.
    #[serde(default)]
    pub thread_density: f64,
    /// g/m²
    #[serde(default)]
    pub grammage_m2: f64,
    /// metres
    #[serde(default)]
    pub fabric_width_m: f64,
    #[serde(default)]
    pub composition: Composition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loom {
    pub id: String,
    pub code: String,
    #[serde(default)]
    pub sector: String,
    /// shift name → operator id
    #[serde(default)]
    pub operator_ids: BTreeMap<String, String>,
    pub product_id: String,
}

impl Loom {
    pub fn operator_for(&self, shift_name: &str) -> Option<&str> {
        self.operator_ids.get(shift_name).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Viewer,
}

/// Dashboard account. Only carried so that documents round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
}
