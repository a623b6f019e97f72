mod settings;

pub use settings::{
    CycleSettings, DisplaySettings, Settings, WatchSettings, MAX_DEBOUNCE_MS, START_DATE_KEY,
};

use std::path::PathBuf;

/// Returns `~/.config/cycletint[-dev]/` based on CYCLETINT_ENV.
///
/// Set CYCLETINT_ENV=dev to use the development data directory, or
/// CYCLETINT_HOME to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("CYCLETINT_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("CYCLETINT_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("cycletint-dev")
            } else {
                base_dir.join("cycletint")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
