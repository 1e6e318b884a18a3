use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use std::path::Path;

mod common;
use common::{init_db, init_db_with_shift, lsh, setup_test_db, temp_out};

#[test]
fn test_init_seeds_reference_data() {
    let db_path = setup_test_db("cli_init");

    lsh()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("15 looms").and(contains("2 products")));

    lsh()
        .args(["--db", &db_path, "loom", "list"])
        .assert()
        .success()
        .stdout(contains("T-01").and(contains("T-15")));

    lsh()
        .args(["--db", &db_path, "ith-reason", "list"])
        .assert()
        .success()
        .stdout(contains("Quebra de trama"));
}

#[test]
fn test_shift_flow_reading_and_dashboard() {
    let db_path = setup_test_db("cli_shift_flow");
    init_db_with_shift(&db_path);

    lsh()
        .args(["--db", &db_path, "shift", "status"])
        .assert()
        .success()
        .stdout(contains("Ana"));

    lsh()
        .args(["--db", &db_path, "reading", "log", "T-01=120", "LOOM-2=80,5"])
        .assert()
        .success()
        .stdout(contains("2 reading(s) saved"));

    // below the last reading: the whole batch is rejected
    lsh()
        .args(["--db", &db_path, "reading", "log", "T-01=100", "T-03=10"])
        .assert()
        .failure()
        .stderr(contains("T-01"));

    // a lower value later in the same batch is rejected too
    lsh()
        .args(["--db", &db_path, "reading", "log", "T-01=150", "T-01=130"])
        .assert()
        .failure()
        .stderr(contains("below the last reading 150"));

    lsh()
        .args(["--db", &db_path, "reading", "list", "--loom", "T-01"])
        .assert()
        .success()
        .stdout(contains("120"));

    lsh()
        .args(["--db", &db_path, "dashboard"])
        .assert()
        .success()
        .stdout(contains("T-01").and(contains("T-15")));

    lsh()
        .args(["--db", &db_path, "dashboard", "--loom", "T-01"])
        .assert()
        .success()
        .stdout(contains("OEE"));
}

#[test]
fn test_reading_without_shift_fails() {
    let db_path = setup_test_db("cli_no_shift");
    init_db(&db_path);

    lsh()
        .args(["--db", &db_path, "reading", "log", "T-01=10"])
        .assert()
        .failure()
        .stderr(contains("No active shift"));
}

#[test]
fn test_unknown_loom_is_reported() {
    let db_path = setup_test_db("cli_unknown_loom");
    init_db_with_shift(&db_path);

    lsh()
        .args(["--db", &db_path, "reading", "log", "T-99=10"])
        .assert()
        .failure()
        .stderr(contains("Loom not found: T-99"));
}

#[test]
fn test_stops_and_pareto() {
    let db_path = setup_test_db("cli_stops");
    init_db_with_shift(&db_path);

    lsh()
        .args([
            "--db",
            &db_path,
            "stop",
            "start",
            "T-02",
            "--kind",
            "maintenance",
            "--reason",
            "Mecânica",
        ])
        .assert()
        .success();

    // one active maintenance stop per loom
    lsh()
        .args([
            "--db",
            &db_path,
            "stop",
            "start",
            "T-02",
            "--kind",
            "maintenance",
            "--reason",
            "Elétrica",
        ])
        .assert()
        .failure()
        .stderr(contains("already has an active"));

    lsh()
        .args(["--db", &db_path, "stop", "list", "--active"])
        .assert()
        .success()
        .stdout(contains("Mecânica"));

    lsh()
        .args(["--db", &db_path, "stop", "end", "T-02"])
        .assert()
        .success();

    lsh()
        .args(["--db", &db_path, "pareto"])
        .assert()
        .success()
        .stdout(contains("Mecânica"));
}

#[test]
fn test_ith_cooldown_from_cli() {
    let db_path = setup_test_db("cli_ith");
    init_db_with_shift(&db_path);

    lsh()
        .args(["--db", &db_path, "ith", "add", "T-04", "--reason", "01"])
        .assert()
        .success();

    lsh()
        .args(["--db", &db_path, "ith", "add", "T-04", "--reason", "02"])
        .assert()
        .failure()
        .stderr(contains("wait"));

    lsh()
        .args(["--db", &db_path, "ith", "add", "T-05", "--reason", "77"])
        .assert()
        .failure()
        .stderr(contains("ITH reason not found"));

    lsh()
        .args(["--db", &db_path, "pareto", "--ith"])
        .assert()
        .success()
        .stdout(contains("01 - Quebra de trama"));
}

#[test]
fn test_export_and_restore_round_trip() {
    let db_path = setup_test_db("cli_export_restore");
    let other_db = setup_test_db("cli_export_restore_target");
    let out = temp_out("cli_export_restore", "json");
    init_db_with_shift(&db_path);
    init_db(&other_db);

    lsh()
        .args(["--db", &db_path, "settings", "set", "--company", "Tecelagem Norte"])
        .assert()
        .success();

    lsh()
        .args(["--db", &db_path, "export", "--file", &out])
        .assert()
        .success();

    let text = fs::read_to_string(&out).expect("exported file");
    assert!(text.contains("\"activeShift\""));
    assert!(text.contains("Tecelagem Norte"));

    // existing file without --force and no tty answer: refused
    lsh()
        .args(["--db", &db_path, "export", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure();

    lsh()
        .args(["--db", &other_db, "restore", "--file", &out, "--yes"])
        .assert()
        .success()
        .stdout(contains("Data restored"));

    lsh()
        .args(["--db", &other_db, "settings", "show"])
        .assert()
        .success()
        .stdout(contains("Tecelagem Norte"));

    lsh()
        .args(["--db", &other_db, "shift", "status"])
        .assert()
        .success()
        .stdout(contains("Ana"));
}

#[test]
fn test_restore_rejects_invalid_document() {
    let db_path = setup_test_db("cli_restore_invalid");
    let bad = temp_out("cli_restore_invalid", "json");
    init_db(&db_path);
    fs::write(&bad, "{\"looms\": []}").unwrap();

    lsh()
        .args(["--db", &db_path, "restore", "--file", &bad, "--yes"])
        .assert()
        .failure()
        .stderr(contains("Invalid or corrupted backup"));
}

#[test]
fn test_readonly_view_blocks_changes() {
    let db_path = setup_test_db("cli_readonly");
    init_db(&db_path);

    lsh()
        .args([
            "--db",
            &db_path,
            "--view",
            "readonly",
            "shift",
            "start",
            "--responsible",
            "Ana",
            "--recorder",
            "Bruno",
        ])
        .assert()
        .failure()
        .stderr(contains("not available in readonly view"));

    lsh()
        .args(["--db", &db_path, "--view", "readonly", "loom", "list"])
        .assert()
        .success();
}

#[test]
fn test_operator_view_allows_floor_recording_only() {
    let db_path = setup_test_db("cli_operator_view");
    init_db_with_shift(&db_path);

    lsh()
        .args(["--db", &db_path, "--view", "operator", "reading", "log", "T-01=5"])
        .assert()
        .success();

    lsh()
        .args([
            "--db",
            &db_path,
            "--view",
            "operator",
            "loom",
            "add",
            "--code",
            "T-20",
            "--product",
            "prod-1",
        ])
        .assert()
        .failure()
        .stderr(contains("operator view"));
}

#[test]
fn test_shift_report_xlsx_and_pdf() {
    let db_path = setup_test_db("cli_report");
    let xlsx = temp_out("cli_report", "xlsx");
    let pdf = temp_out("cli_report", "pdf");
    init_db_with_shift(&db_path);

    lsh()
        .args(["--db", &db_path, "reading", "log", "T-01=50"])
        .assert()
        .success();

    lsh()
        .args(["--db", &db_path, "report", "shift", "--file", &xlsx])
        .assert()
        .success();
    assert!(Path::new(&xlsx).exists());

    lsh()
        .args([
            "--db", &db_path, "report", "shift", "--format", "pdf", "--file", &pdf,
        ])
        .assert()
        .success();
    let bytes = fs::read(&pdf).expect("pdf written");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_end_shift_then_history() {
    let db_path = setup_test_db("cli_history");
    let csv = temp_out("cli_history", "csv");
    init_db_with_shift(&db_path);

    lsh()
        .args(["--db", &db_path, "shift", "end", "--summary", "quiet night"])
        .assert()
        .success()
        .stdout(contains("moved to the history"));

    lsh()
        .args(["--db", &db_path, "history", "list"])
        .assert()
        .success()
        .stdout(contains("Ana"));

    lsh()
        .args(["--db", &db_path, "history", "show", "1"])
        .assert()
        .success()
        .stdout(contains("quiet night"));

    lsh()
        .args([
            "--db", &db_path, "report", "shift", "--history", "1", "--format", "csv", "--file",
            &csv,
        ])
        .assert()
        .success();
    assert!(Path::new(&csv).exists());

    // no active shift any more
    lsh()
        .args(["--db", &db_path, "report", "shift", "--file", &csv, "--force"])
        .assert()
        .failure()
        .stderr(contains("No active shift"));
}

#[test]
fn test_log_prints_audit_rows() {
    let db_path = setup_test_db("cli_log");
    init_db_with_shift(&db_path);

    lsh()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("shift_start"));
}
