use chrono::NaiveDate;
use clap::Subcommand;
use dayplan_core::export::format_duration;
use dayplan_core::{Config, DaySummaryAnalyzer, PlanDb, Suggestion};

use super::resolve_day;

#[derive(Subcommand)]
pub enum SummaryAction {
    /// Show the day summary
    Show {
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Emit JSON instead of the report
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: SummaryAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = PlanDb::open()?;
    let config = Config::load_or_default();
    match action {
        SummaryAction::Show { date, json } => {
            let day = resolve_day(date);
            let blocks = db.list_blocks(day)?;
            let categories = db.list_categories()?;
            let analyzer = DaySummaryAnalyzer::with_thresholds(config.suggestion_thresholds());
            let summary = analyzer.summarize(config.day_window()?, &blocks, &categories)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
                return Ok(());
            }

            println!("Summary for {day}");
            println!(
                "  blocks:     {} total, {} done ({}%)",
                summary.total, summary.completed, summary.completion_rate
            );
            println!("  committed:  {}", format_duration(summary.busy_minutes));
            println!("  free:       {}", format_duration(summary.free_minutes));
            if let Some(longest) = &summary.longest {
                println!(
                    "  longest:    {} ({})",
                    longest.label,
                    format_duration(longest.minutes)
                );
            }
            if !summary.by_category.is_empty() {
                println!("  by category:");
                for entry in &summary.by_category {
                    let title = entry.title.as_deref().unwrap_or(entry.category_ref.as_str());
                    println!("    {title}: {}", format_duration(entry.minutes));
                }
            }
            let advice = match &summary.suggestion {
                Suggestion::FocusCurrent => "focus on the tasks already planned".to_string(),
                Suggestion::AllocateCategory { title, minutes, .. } => {
                    format!("nothing logged for '{title}' yet, consider {minutes} minutes")
                }
                Suggestion::RestReflect => "all categories touched, take time to rest".to_string(),
            };
            println!("  suggestion: {advice}");
        }
    }
    Ok(())
}
