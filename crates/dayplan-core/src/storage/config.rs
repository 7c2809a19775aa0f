//! TOML-based application configuration.
//!
//! Stores the default planning window and the suggestion thresholds.
//! Configuration lives at `data_dir()/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::{ConfigError, CoreError, ValidationError};
use crate::stats::SuggestionThresholds;
use crate::timeline::DayWindow;

/// Planning window configuration, `HH:MM` bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_window_start")]
    pub start: String,
    #[serde(default = "default_window_end")]
    pub end: String,
}

/// Suggestion heuristic configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionConfig {
    #[serde(default = "default_30")]
    pub focus_threshold_min: i64,
    #[serde(default = "default_30")]
    pub allocation_min: i64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `data_dir()/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub suggestion: SuggestionConfig,
}

fn default_window_start() -> String {
    "05:00".to_string()
}
fn default_window_end() -> String {
    "23:00".to_string()
}
fn default_30() -> i64 {
    30
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            start: default_window_start(),
            end: default_window_end(),
        }
    }
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            focus_threshold_min: 30,
            allocation_min: 30,
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, CoreError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk; a missing file writes and returns the default.
    ///
    /// # Errors
    /// Returns an error if an existing file cannot be parsed or the
    /// default cannot be written.
    pub fn load() -> Result<Self, CoreError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path,
                    message: e.to_string(),
                })?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, falling back to the default on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save(&self) -> Result<(), CoreError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// The configured planning window.
    pub fn day_window(&self) -> Result<DayWindow, ValidationError> {
        DayWindow::parse(&self.window.start, &self.window.end)
    }

    /// The configured suggestion thresholds.
    pub fn suggestion_thresholds(&self) -> SuggestionThresholds {
        SuggestionThresholds {
            focus_threshold_min: self.suggestion.focus_threshold_min,
            allocation_min: self.suggestion.allocation_min,
        }
    }

    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }
        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key and persist.
    ///
    /// # Errors
    /// Returns an error for an unknown key, an unparseable value, or a
    /// failed save.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());

        let mut json = serde_json::to_value(&*self)?;
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(unknown().into());
        }

        let mut current = &mut json;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;
                let new_value = match existing {
                    serde_json::Value::Number(_) => {
                        let n: i64 = value.parse().map_err(|_| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: format!("cannot parse '{value}' as number"),
                        })?;
                        serde_json::Value::Number(n.into())
                    }
                    _ => serde_json::Value::String(value.to_string()),
                };
                obj.insert(part.to_string(), new_value);
                break;
            }
            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        let updated: Config = serde_json::from_value(json)?;
        // Window strings must still parse as a valid window
        updated.day_window().map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;

        *self = updated;
        self.save()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.window.start, "05:00");
        assert_eq!(parsed.window.end, "23:00");
        assert_eq!(parsed.suggestion.focus_threshold_min, 30);
    }

    #[test]
    fn default_window_parses_to_expected_bounds() {
        let window = Config::default().day_window().unwrap();
        assert_eq!((window.start, window.end), (300, 1380));
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("window.start").as_deref(), Some("05:00"));
        assert_eq!(cfg.get("suggestion.allocation_min").as_deref(), Some("30"));
        assert!(cfg.get("window.missing").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: Config = toml::from_str("[window]\nstart = \"06:00\"\n").unwrap();
        assert_eq!(cfg.window.start, "06:00");
        assert_eq!(cfg.window.end, "23:00");
        assert_eq!(cfg.suggestion.allocation_min, 30);
    }
}
