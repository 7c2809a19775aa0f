//! # Dayplan Core Library
//!
//! Core business logic for dayplan, a daily time-block planner. All
//! operations are available through the standalone `dayplan` CLI, which
//! is a thin layer over this library.
//!
//! ## Architecture
//!
//! - **Interval Model**: `HH:MM` wall-clock parsing, the [`TaskBlock`]
//!   shape, midnight-crossing duration arithmetic, and stable ordering
//! - **Gap Solver**: cursor sweep deriving the free blocks of a day
//!   inside a bounded planning window
//! - **Statistics**: the day summary (completion rate, busy vs. free
//!   minutes, longest block, per-category totals) and an advisory
//!   suggestion
//! - **Storage**: TOML configuration and SQLite persistence for blocks
//!   and the category directory
//!
//! The compute paths are pure: they take an immutable snapshot of one
//! day's blocks and allocate only their outputs, so concurrent callers
//! need no coordination.

pub mod error;
pub mod export;
pub mod plan;
pub mod stats;
pub mod storage;
pub mod timeline;

pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use export::format_free_blocks_as_text;
pub use plan::{sort_by_start, Recurrence, RecurrenceUnit, TaskBlock, TimeOfDay};
pub use stats::{
    compute_day_summary, CategoryEntry, DaySummary, DaySummaryAnalyzer, Suggestion,
    SuggestionThresholds,
};
pub use storage::{Config, PlanDb};
pub use timeline::{compute_free_blocks, covered_minutes, DayWindow, FreeBlock};
