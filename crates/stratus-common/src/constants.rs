//! System-wide constants and default paths.

use std::path::PathBuf;
use std::time::Duration;

/// Binary name for the CLI.
pub const BIN_NAME: &str = "stratus";

/// Name of the session configuration file.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable overriding the stratus home directory.
pub const HOME_ENV_VAR: &str = "STRATUS_HOME";

/// Default timeout applied to every gateway request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent with every gateway request.
pub const USER_AGENT: &str = concat!("stratus/", env!("CARGO_PKG_VERSION"));

/// Returns the stratus home directory.
///
/// Prefers `$STRATUS_HOME`, then `$HOME/.stratus` (or `%USERPROFILE%`),
/// falling back to `.stratus` in the working directory.
pub fn home_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(HOME_ENV_VAR) {
        return PathBuf::from(dir);
    }
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_or_else(|_| PathBuf::from(".stratus"), |home| PathBuf::from(home).join(".stratus"))
}

/// Returns the default session configuration file path.
pub fn default_config_file() -> PathBuf {
    home_dir().join(CONFIG_FILE_NAME)
}
