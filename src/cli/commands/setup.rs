//! Config file commands.

use super::{Cli, config_file};
use crate::config::{self, Config, ConfigError};
use crate::error::Result;

/// Print where the config file is read from
pub fn cmd_config_path(cli: &Cli) -> Result<()> {
    match config_file(cli) {
        Some(path) => {
            let state = if path.exists() { "exists" } else { "not created yet" };
            println!("{} ({state})", path.display());
            Ok(())
        }
        None => Err(ConfigError::NoConfigDir.into()),
    }
}

/// Write the default config so it can be edited
pub fn cmd_init_config(cli: &Cli, force: bool) -> Result<()> {
    let path = config_file(cli).ok_or(ConfigError::NoConfigDir)?;

    if path.exists() && !force {
        println!("Config already exists at {}", path.display());
        println!("Use --force to overwrite it with the defaults.");
        return Ok(());
    }

    config::save_to(&Config::default(), &path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
