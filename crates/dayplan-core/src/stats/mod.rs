//! Statistics over a day's task blocks.
//!
//! This module derives the day summary (completion rate, busy and free
//! minutes, longest block, per-category totals) and an advisory
//! suggestion for the remainder of the day.

mod suggestion;
mod summary;

pub use suggestion::{suggest, Suggestion, SuggestionThresholds};
pub use summary::{
    compute_day_summary, CategoryEntry, CategoryMinutes, DaySummary, DaySummaryAnalyzer,
    LongestBlock,
};
