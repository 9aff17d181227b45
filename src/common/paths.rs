//! Configuration paths
//!
//! Uses the directories crate for platform-appropriate locations.

use std::path::PathBuf;

/// Name used for the configuration directory
const APP_NAME: &str = "mother";

/// Environment variable that points at an explicit config file
pub const CONFIG_ENV: &str = "MOTHER_CONFIG";

/// Get the configuration directory path
///
/// - Linux: `~/.config/mother/`
/// - macOS: `~/Library/Application Support/mother/`
/// - Windows: `%APPDATA%\mother\`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
///
/// `MOTHER_CONFIG` takes precedence over the platform location.
pub fn config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(explicit));
    }
    config_dir().map(|dir| dir.join("config.toml"))
}
