use loomshift::core::reducer::Action;
use loomshift::core::store::Store;
use loomshift::db::initialize::init_db;
use loomshift::db::log::load_log;
use loomshift::db::pool::DbPool;
use loomshift::db::state_repo::{load_state, load_sync_file};
use loomshift::errors::AppError;
use loomshift::models::state::AppState;
use loomshift::models::stop_kind::StopKind;
use loomshift::sync::read_document;
use std::time::Duration;
use tempfile::tempdir;

fn memory_store() -> Store {
    loomshift::logging::init_test();
    let pool = DbPool::in_memory().expect("in-memory db");
    init_db(&pool.conn).expect("schema");
    Store::open(pool, Duration::from_secs(30)).expect("store")
}

fn add_reason(reason: &str) -> Action {
    Action::AddStopReason {
        kind: StopKind::Operational,
        reason: reason.to_string(),
    }
}

#[test]
fn test_fresh_store_holds_seed_data() {
    let mut store = memory_store();

    assert_eq!(store.state(), &AppState::default());
    assert!(!store.is_synced());
    assert!(store.sync_status().is_none());
    store.flush().unwrap();
}

#[test]
fn test_dispatch_persists_and_audits() {
    let mut store = memory_store();

    store.dispatch(add_reason("Troca de rolo"), 1_000).unwrap();

    assert!(
        store
            .state()
            .settings
            .stop_reasons
            .operational
            .contains(&"Troca de rolo".to_string())
    );

    let expected = store.state().clone();
    let reloaded = load_state(&store.pool().conn).unwrap();
    assert_eq!(reloaded, expected);

    let rows = load_log(&store.pool().conn, None).unwrap();
    let audit: Vec<_> = rows.iter().filter(|r| r.operation == "reason_add").collect();
    assert_eq!(audit.len(), 1);
    assert!(audit[0].target.contains("Troca de rolo"));
}

#[test]
fn test_rejected_dispatch_changes_nothing() {
    let mut store = memory_store();
    let before = store.state().clone();

    let err = store
        .dispatch(add_reason("Limpeza"), 1_000)
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateReason(_)));

    let err = store
        .dispatch(Action::DeleteIth("nope".to_string()), 1_000)
        .unwrap_err();
    assert!(matches!(err, AppError::NoActiveShift));

    assert_eq!(store.state(), &before);
    let rows = load_log(&store.pool().conn, None).unwrap();
    assert!(rows.iter().all(|r| r.operation != "reason_add"));
}

#[test]
fn test_bound_file_follows_dispatches() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shared.json");
    let mut store = memory_store();

    store.bind_sync(&path, true).unwrap();
    store.flush().unwrap();
    assert!(store.is_synced());
    assert_eq!(
        read_document(&path).unwrap().as_ref(),
        Some(store.state())
    );
    assert_eq!(
        load_sync_file(&store.pool().conn).unwrap(),
        Some(path.to_string_lossy().to_string())
    );

    store.dispatch(add_reason("Falta de energia"), 2_000).unwrap();
    store.flush().unwrap();
    let on_disk = read_document(&path).unwrap().unwrap();
    assert_eq!(&on_disk, store.state());

    assert!(store.unbind_sync().unwrap());
    assert!(!store.unbind_sync().unwrap());
    assert_eq!(load_sync_file(&store.pool().conn).unwrap(), None);
}

#[test]
fn test_failed_sync_is_dropped_but_document_kept() {
    let dir = tempdir().unwrap();
    let mut store = memory_store();

    // binding a directory: the first write fails
    store.bind_sync(dir.path(), true).unwrap();
    let err = store.flush().unwrap_err();
    assert!(matches!(err, AppError::SyncFailed(_)));

    assert!(!store.is_synced());
    assert_eq!(load_sync_file(&store.pool().conn).unwrap(), None);

    store.dispatch(add_reason("Sem operador"), 3_000).unwrap();
    store.flush().unwrap();
    assert!(
        store
            .state()
            .settings
            .stop_reasons
            .operational
            .contains(&"Sem operador".to_string())
    );
}

#[test]
fn test_restore_replaces_persisted_document() {
    let mut store = memory_store();
    let mut incoming = AppState::default();
    incoming.settings.company_name = "Tecelagem Sul".to_string();
    incoming.looms.truncate(3);
    incoming.settings.efficiency_goal = 945_358.264_535_817_1;
    incoming.products[1].fabric_width_m = 1.123_456_789_012_345_6;

    store
        .dispatch(Action::Restore(Box::new(incoming.clone())), 5_000)
        .unwrap();

    assert_eq!(load_state(&store.pool().conn).unwrap(), incoming);
}
