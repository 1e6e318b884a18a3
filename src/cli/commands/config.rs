use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::migrate::{migrate_config, missing_keys};
use crate::core::config::ConfigLogic;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if !path.exists() && (*print_config || *check || *migrate || *edit_config) {
            return Err(AppError::Config(format!(
                "{} does not exist, run `loomshift init` first",
                path.display()
            )));
        }

        if *print_config {
            println!("📄 Current configuration ({}):\n", path.display());
            ConfigLogic::print(&path)?;
        }

        if *check {
            let missing = missing_keys(&path)?;
            if missing.is_empty() {
                success("Configuration file is up to date.");
            } else {
                warning(format!("Missing fields: {}", missing.join(", ")));
                info("Run `loomshift config --migrate` to add them with default values.");
            }
        }

        if *migrate {
            let added = migrate_config(&path)?;
            if added.is_empty() {
                info("Nothing to migrate.");
            } else {
                success(format!("Added fields: {}", added.join(", ")));
            }
        }

        if *edit_config {
            ConfigLogic::edit(&path, editor.as_deref())?;
            success(format!("Configuration file edited: {}", path.display()));
        }

        if !(*print_config || *check || *migrate || *edit_config) {
            println!("{}", serde_yaml::to_string(cfg)?);
        }
    }

    Ok(())
}
