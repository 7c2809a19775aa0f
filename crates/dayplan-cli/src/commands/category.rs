use clap::Subcommand;
use dayplan_core::{CategoryEntry, PlanDb};

#[derive(Subcommand)]
pub enum CategoryAction {
    /// Add or update a directory category
    Add {
        /// Display title
        title: String,
        /// Stable id; derived from the title when omitted
        #[arg(long)]
        id: Option<String>,
        /// Optional icon (emoji or short text)
        #[arg(long)]
        icon: Option<String>,
    },
    /// List the category directory in order
    List {
        /// Emit JSON instead of the table
        #[arg(long)]
        json: bool,
    },
    /// Delete a category
    Rm { id: String },
}

/// Lowercase the title into a stable id ("Deep Work" -> "deep-work").
fn slugify(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

pub fn run(action: CategoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = PlanDb::open()?;
    match action {
        CategoryAction::Add { title, id, icon } => {
            let id = id.unwrap_or_else(|| slugify(&title));
            if id.is_empty() {
                return Err("category id is empty".into());
            }
            db.upsert_category(&CategoryEntry {
                id: id.clone(),
                title,
                icon,
            })?;
            println!("category {id} saved");
        }
        CategoryAction::List { json } => {
            let categories = db.list_categories()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&categories)?);
            } else if categories.is_empty() {
                println!("no categories");
            } else {
                for entry in &categories {
                    let icon = entry.icon.as_deref().unwrap_or(" ");
                    println!("{icon} {}  ({})", entry.title, entry.id);
                }
            }
        }
        CategoryAction::Rm { id } => {
            db.delete_category(&id)?;
            println!("category {id} removed");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Deep Work"), "deep-work");
        assert_eq!(slugify("  Health & Fitness  "), "health-fitness");
        assert_eq!(slugify("日本語"), "");
    }
}
