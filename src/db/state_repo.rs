//! Load and save the application document, one `state` row per collection.

use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::state::AppState;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const KEY_LOOMS: &str = "looms";
pub const KEY_SETTINGS: &str = "settings";
pub const KEY_OPERATORS: &str = "operators";
pub const KEY_PRODUCTS: &str = "products";
pub const KEY_USERS: &str = "users";
pub const KEY_ACTIVE_SHIFT: &str = "activeShift";
pub const KEY_SHIFT_HISTORY: &str = "shiftHistory";
/// Path of the file bound for sync; not part of the document.
pub const KEY_SYNC_FILE: &str = "syncFile";

fn get_raw(conn: &Connection, key: &str) -> AppResult<Option<String>> {
    let value = conn
        .query_row("SELECT value FROM state WHERE key = ?1", [key], |row| {
            row.get::<_, String>(0)
        })
        .optional()?;
    Ok(value)
}

fn put_raw(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO state (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, value, Local::now().to_rfc3339()],
    )?;
    Ok(())
}

/// Stored value of `key`, or `default` when the row is absent.
/// A row that does not parse is an error, not silently replaced.
fn load_key<T: DeserializeOwned>(conn: &Connection, key: &str, default: T) -> AppResult<T> {
    match get_raw(conn, key)? {
        Some(text) => serde_json::from_str(&text).map_err(|e| {
            AppError::InvalidBackup(format!("stored \"{key}\" is not valid: {e}"))
        }),
        None => Ok(default),
    }
}

fn save_key<T: Serialize>(conn: &Connection, key: &str, value: &T) -> AppResult<()> {
    let text = serde_json::to_string(value)?;
    put_raw(conn, key, &text)
}

/// Load the document. Missing collections come from the seed data.
pub fn load_state(conn: &Connection) -> AppResult<AppState> {
    let seed = AppState::default();

    Ok(AppState {
        looms: load_key(conn, KEY_LOOMS, seed.looms)?,
        settings: load_key(conn, KEY_SETTINGS, seed.settings)?,
        operators: load_key(conn, KEY_OPERATORS, seed.operators)?,
        products: load_key(conn, KEY_PRODUCTS, seed.products)?,
        users: load_key(conn, KEY_USERS, seed.users)?,
        active_shift: load_key(conn, KEY_ACTIVE_SHIFT, seed.active_shift)?,
        shift_history: load_key(conn, KEY_SHIFT_HISTORY, seed.shift_history)?,
    })
}

/// Write every collection in one transaction.
pub fn save_state(pool: &mut DbPool, state: &AppState) -> AppResult<()> {
    pool.with_tx(|tx| {
        save_key(tx, KEY_LOOMS, &state.looms)?;
        save_key(tx, KEY_SETTINGS, &state.settings)?;
        save_key(tx, KEY_OPERATORS, &state.operators)?;
        save_key(tx, KEY_PRODUCTS, &state.products)?;
        save_key(tx, KEY_USERS, &state.users)?;
        save_key(tx, KEY_ACTIVE_SHIFT, &state.active_shift)?;
        save_key(tx, KEY_SHIFT_HISTORY, &state.shift_history)?;
        Ok(())
    })
}

pub fn load_sync_file(conn: &Connection) -> AppResult<Option<String>> {
    Ok(get_raw(conn, KEY_SYNC_FILE)?.filter(|p| !p.is_empty()))
}

pub fn save_sync_file(conn: &Connection, path: Option<&str>) -> AppResult<()> {
    match path {
        Some(p) => put_raw(conn, KEY_SYNC_FILE, p),
        None => {
            conn.execute("DELETE FROM state WHERE key = ?1", [KEY_SYNC_FILE])?;
            Ok(())
        }
    }
}
