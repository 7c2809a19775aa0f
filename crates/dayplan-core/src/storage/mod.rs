//! Local persistence: TOML configuration and the SQLite plan database.

mod config;
mod plan_db;

pub use config::{Config, SuggestionConfig, WindowConfig};
pub use plan_db::PlanDb;

use std::path::PathBuf;

use crate::error::CoreError;

/// Returns the data directory, `~/.config/dayplan[-dev]/`.
///
/// `DAYPLAN_DATA_DIR` overrides the location entirely (used by tests);
/// otherwise `DAYPLAN_ENV=dev` selects the development directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, CoreError> {
    let dir = if let Ok(custom) = std::env::var("DAYPLAN_DATA_DIR") {
        PathBuf::from(custom)
    } else {
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config");
        let env = std::env::var("DAYPLAN_ENV").unwrap_or_else(|_| "production".to_string());
        if env == "dev" {
            base_dir.join("dayplan-dev")
        } else {
            base_dir.join("dayplan")
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
