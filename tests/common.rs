#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use loomshift::models::entries::{ProductionEntry, Stop};
use loomshift::models::shift::ActiveShift;
use loomshift::models::state::AppState;
use loomshift::models::{BASELINE_NOTE, Millis};
use loomshift::utils::time::local_to_ms;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const MINUTE: Millis = 60_000;
pub const HOUR: Millis = 3_600_000;

pub fn lsh() -> Command {
    cargo_bin_cmd!("loomshift")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_loomshift.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize DB (schema + seed data) through the CLI
pub fn init_db(db_path: &str) {
    lsh()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Init and open a shift with the given responsible
pub fn init_db_with_shift(db_path: &str) {
    init_db(db_path);
    lsh()
        .args([
            "--db",
            db_path,
            "shift",
            "start",
            "--responsible",
            "Ana",
            "--recorder",
            "Bruno",
        ])
        .assert()
        .success();
}

/// Local wall-clock instant.
pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> Millis {
    let naive = NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, 0))
        .expect("valid date");
    local_to_ms(naive).expect("resolvable local time")
}

/// Seed document with an open shift starting at `start`, one baseline per loom.
pub fn state_with_shift(start: Millis) -> AppState {
    let mut state = AppState::default();
    let production = state
        .looms
        .iter()
        .map(|loom| ProductionEntry {
            id: format!("prod-start-{start}-{}", loom.id),
            loom_id: loom.id.clone(),
            reading: 0.0,
            timestamp: start,
            notes: Some(BASELINE_NOTE.to_string()),
        })
        .collect();

    state.active_shift = Some(ActiveShift {
        shift_name: "1º Turno".to_string(),
        shift_start_time: start,
        user_start_time: start,
        responsible: "Ana".to_string(),
        recorder: "Bruno".to_string(),
        production,
        maintenance: Vec::new(),
        interventions: Vec::new(),
        quality_entries: Vec::new(),
        ith_interventions: Vec::new(),
    });
    state
}

pub fn reading(id: &str, loom_id: &str, value: f64, timestamp: Millis) -> ProductionEntry {
    ProductionEntry {
        id: id.to_string(),
        loom_id: loom_id.to_string(),
        reading: value,
        timestamp,
        notes: None,
    }
}

pub fn stop(id: &str, loom_id: &str, reason: &str, start: Millis, end: Option<Millis>) -> Stop {
    Stop {
        id: id.to_string(),
        loom_id: loom_id.to_string(),
        start,
        end,
        reason: reason.to_string(),
        notes: None,
    }
}

pub fn shift_mut(state: &mut AppState) -> &mut ActiveShift {
    state.active_shift.as_mut().expect("active shift")
}
