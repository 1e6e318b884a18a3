use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::db::initialize::open_db;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    // `--print` is implied
    if let Commands::Log { limit, .. } = cmd {
        let mut pool = open_db(&cfg.database)?;
        LogLogic::print_log(&mut pool, *limit)?;
    }

    Ok(())
}
