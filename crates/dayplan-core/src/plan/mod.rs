//! Interval model: wall-clock times, task blocks, and ordering.
//!
//! This module provides:
//! - Wall-clock parsing of `HH:MM` strings into comparable minute values
//! - The [`TaskBlock`] model for a single scheduled activity
//! - Midnight-crossing duration arithmetic and stable start-time ordering

mod block;
mod clock;

pub use block::{sort_by_start, Recurrence, RecurrenceUnit, TaskBlock};
pub use clock::{to_minutes, TimeOfDay};
