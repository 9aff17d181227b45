//! CLI command handling
//!
//! Dispatches CLI commands and formats output.

use std::path::Path;

use crate::commands::{Commands, ConfigCommands};
use crate::common::config::Config;
use crate::common::{paths, Error, Result};

/// Dispatch a CLI command
pub fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Config(ConfigCommands::Show { file }) => {
            let config = match file {
                Some(path) => Config::load_from(&path)?,
                None => Config::load()?,
            };
            print!("{}", config.to_toml()?);
            Ok(())
        }

        Commands::Config(ConfigCommands::Path) => {
            let path = paths::config_path()
                .ok_or_else(|| Error::Config("Could not determine a configuration directory".to_string()))?;
            let status = if path.exists() { "exists" } else { "not created" };
            println!("{} ({})", path.display(), status);
            Ok(())
        }

        Commands::Config(ConfigCommands::Init { force }) => {
            let path = paths::config_path()
                .ok_or_else(|| Error::Config("Could not determine a configuration directory".to_string()))?;
            write_default_config(&path, force)?;
            println!("Wrote default configuration to {}", path.display());
            Ok(())
        }
    }
}

/// Write the default configuration to `path`, refusing to clobber unless `force`
pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::Config(format!(
            "'{}' already exists. Use --force to overwrite",
            path.display()
        )));
    }

    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }

    let content = Config::default().to_toml()?;
    std::fs::write(path, content).map_err(|e| Error::FileWrite {
        path: path.display().to_string(),
        error: e.to_string(),
    })?;
    tracing::info!(path = %path.display(), "configuration written");
    Ok(())
}
