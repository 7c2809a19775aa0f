//! The task block model and its ordering.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::clock::{to_minutes, TimeOfDay};
use crate::error::ValidationError;

/// Unit of a recurrence rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceUnit {
    Day,
    Week,
    Month,
}

/// A recurrence rule attached to a task block.
///
/// Expansion of a rule into concrete day instances is owned by an
/// external scheduler; this library only stores and round-trips the rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurrence {
    /// Every `interval` units (must be >= 1)
    pub interval: u32,
    pub unit: RecurrenceUnit,
    /// Weekdays 0=Sun .. 6=Sat; only meaningful when `unit` is `Week`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub days_of_week: Vec<u8>,
    /// Optional last day the rule applies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<NaiveDate>,
}

impl Recurrence {
    /// Check rule invariants: positive interval, weekdays in 0..=6.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.interval == 0 {
            return Err(ValidationError::InvalidValue {
                field: "recurrence.interval".to_string(),
                message: "interval must be at least 1".to_string(),
            });
        }
        if let Some(&day) = self.days_of_week.iter().find(|&&d| d > 6) {
            return Err(ValidationError::InvalidValue {
                field: "recurrence.days_of_week".to_string(),
                message: format!("weekday {day} is outside 0..=6"),
            });
        }
        Ok(())
    }
}

/// One scheduled activity on a given day.
///
/// `start` and `end` keep the `HH:MM` strings as originally entered. An
/// `end` numerically before `start` marks a block crossing midnight;
/// duration arithmetic adds a full day in that case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskBlock {
    pub id: String,
    /// Free-text description; may be empty pending user input
    #[serde(default)]
    pub label: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub completed: bool,
    /// Opaque reference into an external goal/vision directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
}

impl TaskBlock {
    /// Create a block with a fresh id and the given times.
    pub fn new(label: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            label: label.into(),
            start: start.into(),
            end: end.into(),
            completed: false,
            category_ref: None,
            recurrence: None,
        }
    }

    pub fn with_category(mut self, category_ref: impl Into<String>) -> Self {
        self.category_ref = Some(category_ref.into());
        self
    }

    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = Some(recurrence);
        self
    }

    /// Parsed start time in minutes since midnight.
    pub fn start_minutes(&self) -> Result<i64, ValidationError> {
        to_minutes(&self.start)
    }

    /// Parsed end time in minutes since midnight.
    pub fn end_minutes(&self) -> Result<i64, ValidationError> {
        to_minutes(&self.end)
    }

    /// Duration in minutes, with midnight-crossing correction.
    ///
    /// An end before the start means the block runs past midnight, so a
    /// full day is added: `23:00 -> 02:00` is 180 minutes.
    pub fn duration_minutes(&self) -> Result<i64, ValidationError> {
        let start = self.start_minutes()?;
        let end = self.end_minutes()?;
        let raw = end - start;
        Ok(if raw < 0 {
            raw + TimeOfDay::MINUTES_PER_DAY
        } else {
            raw
        })
    }
}

/// Stable sort ascending by parsed start time.
///
/// Ties keep their original input order so rendering stays deterministic
/// for same-start blocks. Fails on the first malformed time string.
pub fn sort_by_start(blocks: &[TaskBlock]) -> Result<Vec<TaskBlock>, ValidationError> {
    let mut keyed: Vec<(i64, &TaskBlock)> = Vec::with_capacity(blocks.len());
    for block in blocks {
        keyed.push((block.start_minutes()?, block));
    }
    keyed.sort_by_key(|(start, _)| *start);
    Ok(keyed.into_iter().map(|(_, b)| b.clone()).collect())
}
