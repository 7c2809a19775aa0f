use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "dayplan", version, about = "Daily time-block planner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Task block management
    Block {
        #[command(subcommand)]
        action: commands::block::BlockAction,
    },
    /// Free-time derivation
    Free {
        #[command(subcommand)]
        action: commands::free::FreeAction,
    },
    /// Day summary statistics
    Summary {
        #[command(subcommand)]
        action: commands::summary::SummaryAction,
    },
    /// Category directory management
    Category {
        #[command(subcommand)]
        action: commands::category::CategoryAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Block { action } => commands::block::run(action),
        Commands::Free { action } => commands::free::run(action),
        Commands::Summary { action } => commands::summary::run(action),
        Commands::Category { action } => commands::category::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
