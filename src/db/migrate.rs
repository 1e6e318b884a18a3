use rusqlite::{Connection, OptionalExtension};

use crate::errors::{AppError, AppResult};

/// Ensure that the `log` table exists. Migrations record themselves there.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Run `sql` once, then mark `version` as applied.
fn apply_once(conn: &Connection, version: &str, message: &str, sql: &str) -> AppResult<bool> {
    if is_applied(conn, version)? {
        return Ok(false);
    }

    conn.execute_batch(sql)
        .map_err(|e| AppError::Migration(format!("{version}: {e}")))?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;

    tracing::info!(version, "migration applied");
    Ok(true)
}

/// Key/value store of the application document, one row per collection.
const CREATE_STATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS state (
        key        TEXT PRIMARY KEY,
        value      TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
"#;

const CREATE_LOG_INDEX: &str = r#"
    CREATE INDEX IF NOT EXISTS idx_log_operation ON log(operation);
"#;

/// Public entry point: run all pending migrations.
///
/// Called by `db::initialize::init_db()`.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    apply_once(
        conn,
        "20250301_0001_create_state",
        "Created state table",
        CREATE_STATE_TABLE,
    )?;

    apply_once(
        conn,
        "20250301_0002_log_operation_index",
        "Indexed log by operation",
        CREATE_LOG_INDEX,
    )?;

    Ok(())
}
