use chrono::NaiveDate;
use clap::Subcommand;
use dayplan_core::export::{format_duration, format_minutes};
use dayplan_core::{compute_free_blocks, format_free_blocks_as_text, Config, PlanDb};

use super::{resolve_day, resolve_window};

#[derive(Subcommand)]
pub enum FreeAction {
    /// Show the free blocks of a day
    Show {
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Window override as HH:MM-HH:MM (default from config)
        #[arg(long)]
        window: Option<String>,
        /// Emit JSON instead of the table
        #[arg(long)]
        json: bool,
    },
    /// Render the shareable free-time message
    Text {
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Window override as HH:MM-HH:MM (default from config)
        #[arg(long)]
        window: Option<String>,
    },
}

pub fn run(action: FreeAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = PlanDb::open()?;
    let config = Config::load_or_default();
    match action {
        FreeAction::Show { date, window, json } => {
            let day = resolve_day(date);
            let window = resolve_window(window.as_deref(), &config)?;
            let free = compute_free_blocks(window, &db.list_blocks(day)?)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&free)?);
            } else if free.is_empty() {
                println!("no free time on {day}");
            } else {
                for block in &free {
                    println!(
                        "{} – {}  ({})",
                        format_minutes(block.start),
                        format_minutes(block.end),
                        format_duration(block.duration_minutes())
                    );
                }
            }
        }
        FreeAction::Text { date, window } => {
            let day = resolve_day(date);
            let window = resolve_window(window.as_deref(), &config)?;
            let free = compute_free_blocks(window, &db.list_blocks(day)?)?;
            println!("{}", format_free_blocks_as_text(&free, day));
        }
    }
    Ok(())
}
