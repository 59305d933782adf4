mod settings;
mod stats;

pub use settings::{parse_hhmm, NotificationSettings, Settings};
pub use stats::{today, DailySummary, DayTotal, FocusLog, MemoryFocusLog, StatsDb};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the data directory, creating it if needed.
///
/// `POMOWICK_DATA_DIR` wins when set. Otherwise `~/.config/pomowick/`, or
/// `~/.config/pomowick-dev/` with `POMOWICK_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("POMOWICK_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("POMOWICK_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("pomowick-dev")
            } else {
                base_dir.join("pomowick")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
