mod config;
pub mod database;

pub use config::{CatalogConfig, Config, FilterConfig, LoggingConfig, PositionConfig};
pub use database::Database;

use std::path::PathBuf;

/// Returns the PitchPost data directory, creating it if needed.
///
/// `PITCHPOST_HOME` wins when set. Otherwise `~/.config/pitchpost[-dev]/`,
/// with the `-dev` suffix selected by `PITCHPOST_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("PITCHPOST_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("PITCHPOST_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("pitchpost-dev")
            } else {
                base_dir.join("pitchpost")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
