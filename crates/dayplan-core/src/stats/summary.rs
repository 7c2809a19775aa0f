//! Day summary derivation.
//!
//! Busy minutes are additive: overlapping blocks double-count because
//! the figure reflects time committed. Free minutes come from the gap
//! solver's merged view, where overlaps count once. The two views are
//! intentionally different statistics.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::suggestion::{suggest, Suggestion, SuggestionThresholds};
use crate::error::ValidationError;
use crate::plan::TaskBlock;
use crate::timeline::{covered_minutes, DayWindow};

/// One entry of the externally owned category directory, injected by
/// the caller. Directory order drives output and suggestion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Total minutes logged against one category today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMinutes {
    pub category_ref: String,
    /// Resolved from the directory; `None` when the reference is stale
    pub title: Option<String>,
    pub minutes: i64,
}

/// The single longest block of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongestBlock {
    pub id: String,
    pub label: String,
    pub minutes: i64,
}

/// Aggregate statistics for one day of task blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub total: usize,
    pub completed: usize,
    /// Rounded percentage; 0 when there are no blocks
    pub completion_rate: u8,
    /// Additive sum of block durations (overlaps double-count)
    pub busy_minutes: i64,
    /// Window span minus merged busy coverage (overlaps count once)
    pub free_minutes: i64,
    pub longest: Option<LongestBlock>,
    /// Per-category totals in directory order, then unknown references
    /// in first-seen order; unlinked blocks are excluded here
    pub by_category: Vec<CategoryMinutes>,
    pub suggestion: Suggestion,
}

/// Analyzer computing [`DaySummary`] values.
#[derive(Debug, Clone, Default)]
pub struct DaySummaryAnalyzer {
    pub thresholds: SuggestionThresholds,
}

impl DaySummaryAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thresholds(thresholds: SuggestionThresholds) -> Self {
        Self { thresholds }
    }

    /// Derive the summary for one day.
    ///
    /// # Errors
    /// Fails on a malformed `HH:MM` time or an empty window.
    pub fn summarize(
        &self,
        window: DayWindow,
        blocks: &[TaskBlock],
        categories: &[CategoryEntry],
    ) -> Result<DaySummary, ValidationError> {
        let total = blocks.len();
        let completed = blocks.iter().filter(|b| b.completed).count();
        let completion_rate = if total == 0 {
            0
        } else {
            (100.0 * completed as f64 / total as f64).round() as u8
        };

        let mut busy_minutes = 0i64;
        let mut longest: Option<LongestBlock> = None;
        let mut category_totals: HashMap<&str, i64> = HashMap::new();
        let mut seen_refs: Vec<&str> = Vec::new();

        for block in blocks {
            let minutes = block.duration_minutes()?;
            busy_minutes += minutes;

            // First-encountered wins ties
            if longest.as_ref().map_or(true, |l| minutes > l.minutes) {
                longest = Some(LongestBlock {
                    id: block.id.clone(),
                    label: block.label.clone(),
                    minutes,
                });
            }

            if let Some(category_ref) = block.category_ref.as_deref() {
                if !category_totals.contains_key(category_ref) {
                    seen_refs.push(category_ref);
                }
                *category_totals.entry(category_ref).or_insert(0) += minutes;
            }
        }

        let free_minutes = (window.span() - covered_minutes(window, blocks)?).max(0);

        // Directory entries first, stale references after in first-seen order
        let mut by_category: Vec<CategoryMinutes> = categories
            .iter()
            .filter_map(|entry| {
                category_totals.get(entry.id.as_str()).map(|&minutes| CategoryMinutes {
                    category_ref: entry.id.clone(),
                    title: Some(entry.title.clone()),
                    minutes,
                })
            })
            .collect();
        for category_ref in seen_refs {
            if !categories.iter().any(|c| c.id == category_ref) {
                by_category.push(CategoryMinutes {
                    category_ref: category_ref.to_string(),
                    title: None,
                    minutes: category_totals[category_ref],
                });
            }
        }

        let suggestion = suggest(
            free_minutes,
            categories,
            &category_totals,
            &self.thresholds,
        );

        Ok(DaySummary {
            total,
            completed,
            completion_rate,
            busy_minutes,
            free_minutes,
            longest,
            by_category,
            suggestion,
        })
    }
}

/// Derive the [`DaySummary`] with default suggestion thresholds.
pub fn compute_day_summary(
    window: DayWindow,
    blocks: &[TaskBlock],
    categories: &[CategoryEntry],
) -> Result<DaySummary, ValidationError> {
    DaySummaryAnalyzer::new().summarize(window, blocks, categories)
}
