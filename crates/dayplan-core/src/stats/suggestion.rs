//! Advisory suggestion for the remainder of the day.
//!
//! Presentation guidance only: little free time means focus on what is
//! already planned; otherwise the first directory category with nothing
//! logged today gets a small allocation; failing that, rest.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::summary::CategoryEntry;

/// Thresholds steering the suggestion heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionThresholds {
    /// At or below this many free minutes, suggest focusing on current tasks
    pub focus_threshold_min: i64,
    /// Minutes to propose for an untouched category
    pub allocation_min: i64,
}

impl Default for SuggestionThresholds {
    fn default() -> Self {
        Self {
            focus_threshold_min: 30,
            allocation_min: 30,
        }
    }
}

/// Advisory suggestion derived from a day's free time and category use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Suggestion {
    /// Free time is nearly gone; finish what is planned
    FocusCurrent,
    /// A directory category has no minutes logged today
    AllocateCategory {
        category_ref: String,
        title: String,
        minutes: i64,
    },
    /// All categories touched and time to spare
    RestReflect,
}

/// Pick a suggestion. Under-represented categories are considered in
/// directory order; the first with zero minutes today wins.
pub fn suggest(
    free_minutes: i64,
    categories: &[CategoryEntry],
    category_totals: &HashMap<&str, i64>,
    thresholds: &SuggestionThresholds,
) -> Suggestion {
    if free_minutes <= thresholds.focus_threshold_min {
        return Suggestion::FocusCurrent;
    }

    for entry in categories {
        let logged = category_totals.get(entry.id.as_str()).copied().unwrap_or(0);
        if logged == 0 {
            return Suggestion::AllocateCategory {
                category_ref: entry.id.clone(),
                title: entry.title.clone(),
                minutes: thresholds.allocation_min,
            };
        }
    }

    Suggestion::RestReflect
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<CategoryEntry> {
        vec![
            CategoryEntry {
                id: "health".to_string(),
                title: "Health".to_string(),
                icon: None,
            },
            CategoryEntry {
                id: "work".to_string(),
                title: "Work".to_string(),
                icon: None,
            },
        ]
    }

    #[test]
    fn tight_day_suggests_focus() {
        let totals = HashMap::new();
        let s = suggest(30, &categories(), &totals, &SuggestionThresholds::default());
        assert_eq!(s, Suggestion::FocusCurrent);
    }

    #[test]
    fn first_untouched_category_in_directory_order_wins() {
        let mut totals = HashMap::new();
        totals.insert("work", 60);
        let s = suggest(120, &categories(), &totals, &SuggestionThresholds::default());
        assert_eq!(
            s,
            Suggestion::AllocateCategory {
                category_ref: "health".to_string(),
                title: "Health".to_string(),
                minutes: 30,
            }
        );
    }

    #[test]
    fn all_categories_touched_suggests_rest() {
        let mut totals = HashMap::new();
        totals.insert("work", 60);
        totals.insert("health", 15);
        let s = suggest(120, &categories(), &totals, &SuggestionThresholds::default());
        assert_eq!(s, Suggestion::RestReflect);
    }

    #[test]
    fn empty_directory_with_free_time_suggests_rest() {
        let totals = HashMap::new();
        let s = suggest(120, &[], &totals, &SuggestionThresholds::default());
        assert_eq!(s, Suggestion::RestReflect);
    }

    #[test]
    fn custom_thresholds_apply() {
        let totals = HashMap::new();
        let thresholds = SuggestionThresholds {
            focus_threshold_min: 200,
            allocation_min: 45,
        };
        assert_eq!(suggest(150, &[], &totals, &thresholds), Suggestion::FocusCurrent);
        let s = suggest(300, &categories(), &totals, &thresholds);
        assert_eq!(
            s,
            Suggestion::AllocateCategory {
                category_ref: "health".to_string(),
                title: "Health".to_string(),
                minutes: 45,
            }
        );
    }
}
