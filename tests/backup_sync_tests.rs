use loomshift::core::backup::{BackupLogic, parse_document, read_document_file, to_document};
use loomshift::errors::AppError;
use loomshift::models::state::AppState;
use loomshift::sync::{FileSync, SyncStatus, read_document};
use std::fs;
use std::io::Read;
use std::thread;
use std::time::Duration;
use tempfile::tempdir;

mod common;
use common::{at, state_with_shift};

fn with_company(name: &str) -> AppState {
    let mut state = AppState::default();
    state.settings.company_name = name.to_string();
    state
}

#[test]
fn test_export_and_parse_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("backup.json");
    let state = state_with_shift(at(2025, 3, 10, 6, 0));

    BackupLogic::export_json(&state, &path).unwrap();
    let restored = read_document_file(&path).unwrap();

    assert_eq!(restored, state);
}

// Deterministic spread of 17-significant-digit values.
fn awkward_floats(n: usize) -> Vec<f64> {
    let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
    (0..n)
        .map(|_| {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            (seed % 1_000_000_000_000) as f64 / 1_000_003.0
        })
        .collect()
}

#[test]
fn test_float_values_survive_document_round_trip() {
    let mut state = state_with_shift(at(2025, 3, 10, 6, 0));
    let values = awkward_floats(2_000);

    {
        let shift = state.active_shift.as_mut().unwrap();
        for (i, v) in values.iter().enumerate() {
            shift.production.push(common::reading(
                &format!("prod-LOOM-1-{i}"),
                "LOOM-1",
                *v,
                at(2025, 3, 10, 7, 0),
            ));
        }
    }
    state.products[0].thread_density = 12.345_678_901_234_567;
    state.settings.efficiency_goal = 970_273.349_027_325_3;

    let restored = parse_document(&to_document(&state).unwrap()).unwrap();
    assert_eq!(restored, state);
}

#[test]
fn test_document_uses_camel_case_keys() {
    let text = to_document(&state_with_shift(at(2025, 3, 10, 6, 0))).unwrap();

    assert!(text.contains("\"activeShift\""));
    assert!(text.contains("\"shiftHistory\""));
    assert!(text.contains("\"hourlyProductionGoal\""));
    assert!(text.contains("\"ithStopReasons\""));
}

#[test]
fn test_parse_rejects_missing_required_field() {
    let mut value = serde_json::to_value(AppState::default()).unwrap();
    value.as_object_mut().unwrap().remove("products");

    match parse_document(&value.to_string()) {
        Err(AppError::InvalidBackup(msg)) => assert!(msg.contains("products")),
        other => panic!("expected InvalidBackup, got {other:?}"),
    }
}

#[test]
fn test_parse_rejects_garbage() {
    assert!(matches!(
        parse_document("not json"),
        Err(AppError::InvalidBackup(_))
    ));
    assert!(matches!(
        parse_document("[1, 2, 3]"),
        Err(AppError::InvalidBackup(_))
    ));
}

#[test]
fn test_optional_collections_default_when_absent() {
    let mut value = serde_json::to_value(AppState::default()).unwrap();
    let obj = value.as_object_mut().unwrap();
    obj.remove("operators");
    obj.remove("shiftHistory");
    obj.remove("activeShift");

    let state = parse_document(&value.to_string()).unwrap();
    assert!(state.operators.is_empty());
    assert!(state.shift_history.is_empty());
    assert!(state.active_shift.is_none());
}

#[test]
fn test_compressed_backup_replaces_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("daily.json");

    let out = BackupLogic::backup(&with_company("ACME"), &path, true).unwrap();

    assert_eq!(out, dir.path().join("daily.zip"));
    assert!(out.exists());
    assert!(!path.exists());

    let file = fs::File::open(&out).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut entry = archive.by_name("daily.json").unwrap();
    let mut text = String::new();
    entry.read_to_string(&mut text).unwrap();
    assert_eq!(parse_document(&text).unwrap(), with_company("ACME"));
}

#[test]
fn test_sync_coalesces_burst_into_last_snapshot() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mirror.json");
    let sync = FileSync::connect(&path, Duration::from_millis(150)).unwrap();

    assert_eq!(sync.status(), SyncStatus::Idle);

    sync.schedule(&with_company("first")).unwrap();
    sync.schedule(&with_company("second")).unwrap();
    sync.schedule(&with_company("third")).unwrap();

    thread::sleep(Duration::from_millis(600));

    match sync.status() {
        SyncStatus::Saved { writes, .. } => assert_eq!(writes, 1),
        other => panic!("expected Saved, got {other:?}"),
    }
    let on_disk = read_document(&path).unwrap().unwrap();
    assert_eq!(on_disk.settings.company_name, "third");
}

#[test]
fn test_sync_flush_writes_immediately() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mirror.json");
    let sync = FileSync::connect(&path, Duration::from_secs(30)).unwrap();

    sync.schedule(&with_company("flushed")).unwrap();
    sync.flush().unwrap();

    let on_disk = read_document(&path).unwrap().unwrap();
    assert_eq!(on_disk.settings.company_name, "flushed");
    assert!(matches!(sync.status(), SyncStatus::Saved { writes: 1, .. }));

    // nothing pending: flush is a no-op
    sync.flush().unwrap();
    assert!(matches!(sync.status(), SyncStatus::Saved { writes: 1, .. }));
}

#[test]
fn test_sync_drop_writes_pending_snapshot() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mirror.json");

    {
        let sync = FileSync::connect(&path, Duration::from_secs(30)).unwrap();
        sync.schedule(&with_company("on drop")).unwrap();
    }

    let on_disk = read_document(&path).unwrap().unwrap();
    assert_eq!(on_disk.settings.company_name, "on drop");
}

#[test]
fn test_sync_failure_disconnects() {
    let dir = tempdir().unwrap();
    // a directory cannot be written as a file
    let sync = FileSync::connect(dir.path(), Duration::from_millis(10)).unwrap();

    sync.schedule(&AppState::default()).unwrap();
    let err = sync.flush().unwrap_err();

    assert!(matches!(err, AppError::SyncFailed(_)));
    assert!(!sync.is_connected());
    // later snapshots are ignored
    sync.schedule(&AppState::default()).unwrap();
    assert!(matches!(sync.status(), SyncStatus::Failed(_)));
}

#[test]
fn test_read_document_empty_or_missing_file() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    let empty = dir.path().join("empty.json");
    fs::write(&empty, "  \n").unwrap();

    assert!(read_document(&missing).unwrap().is_none());
    assert!(read_document(&empty).unwrap().is_none());

    let invalid = dir.path().join("invalid.json");
    fs::write(&invalid, "{\"looms\": []}").unwrap();
    assert!(matches!(
        read_document(&invalid),
        Err(AppError::InvalidBackup(_))
    ));
}
