//! Data model of the weaving floor: reference data (looms, products,
//! operators, settings) and the per-shift event logs.

pub mod catalog;
pub mod entries;
pub mod settings;
pub mod shift;
pub mod state;
pub mod stop_kind;

/// Unix timestamp in milliseconds.
pub type Millis = i64;

/// Milliseconds in one hour.
pub const HOUR_MS: f64 = 3_600_000.0;

/// Note attached to the synthetic zero reading created at shift start.
pub const BASELINE_NOTE: &str = "Início do turno";
