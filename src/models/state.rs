use super::catalog::{Composition, FabricComponent, Loom, Operator, Product, User};
use super::settings::{IthReason, Settings, ShiftTime, StopReasons};
use super::shift::{ActiveShift, ShiftRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The whole application document: reference data, the open shift and the
/// shift history. Persisted key by key and exported as one JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub looms: Vec<Loom>,
    pub settings: Settings,
    #[serde(default)]
    pub operators: Vec<Operator>,
    pub products: Vec<Product>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub active_shift: Option<ActiveShift>,
    #[serde(default)]
    pub shift_history: Vec<ShiftRecord>,
}

impl AppState {
    pub fn loom(&self, id: &str) -> Option<&Loom> {
        self.looms.iter().find(|l| l.id == id)
    }

    /// Look a loom up by id first, then by code (case-insensitive).
    pub fn find_loom(&self, key: &str) -> Option<&Loom> {
        self.loom(key).or_else(|| {
            self.looms
                .iter()
                .find(|l| l.code.eq_ignore_ascii_case(key))
        })
    }

    pub fn loom_code(&self, id: &str) -> String {
        self.loom(id)
            .map(|l| l.code.clone())
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn product_of(&self, loom: &Loom) -> Option<&Product> {
        self.product(&loom.product_id)
    }

    pub fn operator(&self, id: &str) -> Option<&Operator> {
        self.operators.iter().find(|o| o.id == id)
    }
}

impl Default for AppState {
    /// Seed data of a fresh installation.
    fn default() -> Self {
        let settings = default_settings();

        let operators = vec![
            operator("op-1", "João Silva", "1001", &settings.shifts[0].name),
            operator("op-2", "Maria Oliveira", "1002", &settings.shifts[1].name),
            operator("op-3", "Carlos Pereira", "1003", &settings.shifts[2].name),
        ];

        let products = vec![
            product("prod-1", "Tecido Padrão A", "TPA-100", 650.0, 40.0, 90.0, 1.6),
            product("prod-2", "Tecido Especial B", "TEB-200", 600.0, 50.0, 120.0, 1.4),
        ];

        let looms = (1..=15)
            .map(|i| {
                let operator_ids: BTreeMap<String, String> = settings
                    .shifts
                    .iter()
                    .filter_map(|s| {
                        operators
                            .iter()
                            .find(|o| o.shift_name == s.name)
                            .map(|o| (s.name.clone(), o.id.clone()))
                    })
                    .collect();

                Loom {
                    id: format!("LOOM-{i}"),
                    code: format!("T-{i:02}"),
                    sector: "Leves".to_string(),
                    operator_ids,
                    product_id: products[(i - 1) % products.len()].id.clone(),
                }
            })
            .collect();

        Self {
            looms,
            settings,
            operators,
            products,
            users: Vec::new(),
            active_shift: None,
            shift_history: Vec::new(),
        }
    }
}

pub fn default_settings() -> Settings {
    Settings {
        company_name: String::new(),
        company_logo: String::new(),
        efficiency_goal: 90.0,
        hourly_production_goal: 15.0,
        shifts: vec![
            shift_time("1º Turno", "06:00", "14:20"),
            shift_time("2º Turno", "14:20", "22:40"),
            shift_time("3º Turno", "22:40", "06:00"),
        ],
        stop_reasons: StopReasons {
            maintenance: to_strings(&["Elétrica", "Mecânica", "Preventiva", "Outra"]),
            operational: to_strings(&[
                "Falta de material",
                "Troca de artigo",
                "Limpeza",
                "Outra",
            ]),
        },
        ith_stop_reasons: vec![
            ith_reason("ith-1", "01", "Quebra de trama"),
            ith_reason("ith-2", "02", "Quebra de urdume"),
            ith_reason("ith-3", "03", "Ajuste de tensão"),
        ],
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn shift_time(name: &str, start: &str, end: &str) -> ShiftTime {
    ShiftTime {
        name: name.to_string(),
        start: start.to_string(),
        end: end.to_string(),
    }
}

fn ith_reason(id: &str, code: &str, description: &str) -> IthReason {
    IthReason {
        id: id.to_string(),
        code: code.to_string(),
        description: description.to_string(),
    }
}

fn operator(id: &str, name: &str, employee_id: &str, shift_name: &str) -> Operator {
    Operator {
        id: id.to_string(),
        name: name.to_string(),
        employee_id: employee_id.to_string(),
        role: "Tecelão".to_string(),
        shift_name: shift_name.to_string(),
    }
}

fn product(
    id: &str,
    name: &str,
    code: &str,
    rpm: f64,
    density: f64,
    grammage: f64,
    width: f64,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        product_code: code.to_string(),
        standard_rpm: rpm,
        thread_density: density,
        grammage_m2: grammage,
        fabric_width_m: width,
        composition: Composition {
            weft: FabricComponent {
                dtex: 1000.0,
                color: "Branco".to_string(),
            },
            warp: FabricComponent {
                dtex: 900.0,
                color: "Branco".to_string(),
            },
            marking_warp: FabricComponent {
                dtex: 900.0,
                color: "Azul".to_string(),
            },
        },
    }
}
