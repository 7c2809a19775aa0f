pub mod block;
pub mod category;
pub mod config;
pub mod free;
pub mod summary;

use chrono::NaiveDate;
use dayplan_core::{Config, DayWindow};

/// Resolve the target day: explicit date or today.
pub fn resolve_day(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| chrono::Local::now().date_naive())
}

/// Resolve the planning window: `HH:MM-HH:MM` override or the
/// configured default.
pub fn resolve_window(
    raw: Option<&str>,
    config: &Config,
) -> Result<DayWindow, Box<dyn std::error::Error>> {
    match raw {
        Some(raw) => {
            let (start, end) = raw
                .split_once('-')
                .ok_or_else(|| format!("invalid window '{raw}', expected HH:MM-HH:MM"))?;
            Ok(DayWindow::parse(start, end)?)
        }
        None => Ok(config.day_window()?),
    }
}
