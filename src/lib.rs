pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::config::AppConfig;
use crate::core::weights::WeightTable;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    /// Rank the named categories, or all of them when empty.
    Rank {
        categories: Vec<String>,
        keep_existing: bool,
    },
    Show {
        category: String,
    },
    List,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Fund ranker starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Rank {
            categories,
            keep_existing,
        } => {
            let weights = WeightTable::default();
            debug!(total = weights.total(), "Using default weight table");
            let source = providers::HttpPageSource::new(&config.providers.factsheet)?;
            cli::rank::run(&config, &categories, keep_existing, &source, &weights).await
        }
        AppCommand::Show { category } => cli::show::run(&config, &category),
        AppCommand::List => cli::list::run(&config),
    }
}
