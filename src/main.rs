use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fundrank::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fundrank::AppCommand {
    fn from(cmd: Commands) -> fundrank::AppCommand {
        match cmd {
            Commands::Rank {
                categories,
                keep_existing,
            } => fundrank::AppCommand::Rank {
                categories,
                keep_existing,
            },
            Commands::Show { category } => fundrank::AppCommand::Show { category },
            Commands::List => fundrank::AppCommand::List,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Scrape factsheets, score funds and rebuild the ranking tables
    Rank {
        /// Categories to rank; all configured categories when omitted
        categories: Vec<String>,

        /// Merge into the existing tables instead of starting fresh
        #[arg(short, long)]
        keep_existing: bool,
    },
    /// Display the stored ranking table of a category
    Show {
        /// Category name as configured
        category: String,
    },
    /// List configured categories
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => match cli.config_path.as_deref() {
            Some(path) => fundrank::cli::setup::setup_at_path(path),
            None => fundrank::cli::setup::setup(),
        },
        Some(cmd) => fundrank::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
