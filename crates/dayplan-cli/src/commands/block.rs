use chrono::NaiveDate;
use clap::Subcommand;
use dayplan_core::{PlanDb, TaskBlock, TimeOfDay};

use super::resolve_day;

#[derive(Subcommand)]
pub enum BlockAction {
    /// Add a task block to a day
    Add {
        /// Block description
        label: String,
        /// Start time (HH:MM)
        start: String,
        /// End time (HH:MM); before the start means past midnight
        end: String,
        /// Target day (YYYY-MM-DD), default today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Category reference to link this block to
        #[arg(long)]
        category: Option<String>,
    },
    /// List the blocks of a day
    List {
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Emit JSON instead of the table
        #[arg(long)]
        json: bool,
    },
    /// Mark a block completed
    Done {
        id: String,
        /// Mark it not completed instead
        #[arg(long)]
        undo: bool,
    },
    /// Edit label or times of a block
    Edit {
        id: String,
        #[arg(long)]
        label: Option<String>,
        /// New start time (HH:MM)
        #[arg(long)]
        start: Option<String>,
        /// New end time (HH:MM)
        #[arg(long)]
        end: Option<String>,
    },
    /// Delete a block
    Rm { id: String },
}

pub fn run(action: BlockAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = PlanDb::open()?;
    match action {
        BlockAction::Add {
            label,
            start,
            end,
            date,
            category,
        } => {
            // Reject malformed times before they reach storage
            start.parse::<TimeOfDay>()?;
            end.parse::<TimeOfDay>()?;

            let mut block = TaskBlock::new(label, start, end);
            if let Some(category) = category {
                block = block.with_category(category);
            }
            let day = resolve_day(date);
            db.insert_block(day, &block)?;
            println!("added {} on {day}", block.id);
        }
        BlockAction::List { date, json } => {
            let day = resolve_day(date);
            let blocks = db.list_blocks(day)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&blocks)?);
            } else if blocks.is_empty() {
                println!("no blocks on {day}");
            } else {
                // Same-start blocks keep their entry order
                for block in &dayplan_core::sort_by_start(&blocks)? {
                    let mark = if block.completed { "x" } else { " " };
                    let category = block
                        .category_ref
                        .as_deref()
                        .map(|c| format!(" #{c}"))
                        .unwrap_or_default();
                    println!(
                        "[{mark}] {}–{}  {}{category}  ({})",
                        block.start, block.end, block.label, block.id
                    );
                }
            }
        }
        BlockAction::Done { id, undo } => {
            db.set_completed(&id, !undo)?;
            println!("{} {id}", if undo { "reopened" } else { "completed" });
        }
        BlockAction::Edit {
            id,
            label,
            start,
            end,
        } => {
            if let Some(start) = start.as_deref() {
                start.parse::<TimeOfDay>()?;
            }
            if let Some(end) = end.as_deref() {
                end.parse::<TimeOfDay>()?;
            }
            db.update_block(&id, label.as_deref(), start.as_deref(), end.as_deref())?;
            println!("updated {id}");
        }
        BlockAction::Rm { id } => {
            db.delete_block(&id)?;
            println!("removed {id}");
        }
    }
    Ok(())
}
