mod config;
pub mod database;
pub mod migrations;

pub use config::{Config, CountdownConfig, LogConfig, StatsConfig, WidgetConfig, CONFIG_FILE};
pub use database::{Database, DATABASE_FILE};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Overrides the data directory when set.
pub const DATA_DIR_ENV: &str = "DEATHTIMER_DATA_DIR";
/// Set to `dev` to use the development data directory.
pub const ENV_VAR: &str = "DEATHTIMER_ENV";

/// Returns `$DEATHTIMER_DATA_DIR`, or `~/.config/deathtimer[-dev]/` based on
/// DEATHTIMER_ENV.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var(ENV_VAR).unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("deathtimer-dev")
            } else {
                base_dir.join("deathtimer")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
