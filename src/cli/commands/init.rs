use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::open_db;
use crate::db::log::ttlog;
use crate::db::state_repo::{load_state, save_state};
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database and its migrations
///  - the seed document (looms, products, operators, settings)
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.as_deref(), cli.test)?;
    let db_path = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing loomshift…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", &db_path);

    let mut pool = open_db(&db_path)?;

    // Missing keys load as the seed; saving them makes the seed explicit.
    let state = load_state(&pool.conn)?;
    save_state(&mut pool, &state)?;

    if let Err(e) = ttlog(
        &pool.conn,
        "init",
        &db_path,
        &format!("Database initialized at {}", &db_path),
    ) {
        warning(format!("Failed to write internal log: {e}"));
    }

    success(format!(
        "loomshift initialized: {} looms, {} products, {} shift windows",
        state.looms.len(),
        state.products.len(),
        state.settings.shifts.len()
    ));
    Ok(())
}
