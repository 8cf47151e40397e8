mod config;
mod snapshot;

pub use config::{Config, StorageConfig};
pub use snapshot::{PartialSnapshot, ScalerSnapshot, DEFAULT_STATE_FILE};

use std::path::PathBuf;

/// Returns the data directory, creating it if needed.
///
/// `DDS_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/dds[-dev]/`, with the `-dev` suffix when `DDS_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("DDS_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("DDS_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("dds-dev")
            } else {
                base_dir.join("dds")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
