use super::ui;
use crate::core::batch::{self, BatchReport, FundOutcome};
use crate::core::config::AppConfig;
use crate::core::page::PageSource;
use crate::core::weights::WeightTable;
use crate::store;
use anyhow::{Context, Result};
use tracing::info;

fn describe(outcome: &FundOutcome) -> String {
    match outcome {
        FundOutcome::Added {
            name, score, rank, ..
        } => ui::style_text(
            &format!("Fund details for {name} added (score {score:.3}, rank #{rank})"),
            ui::StyleType::Success,
        ),
        FundOutcome::FetchFailed { error, .. } => {
            ui::style_text(&error.to_string(), ui::StyleType::Error)
        }
        FundOutcome::ExtractionFailed { error, .. } => {
            ui::style_text(&error.to_string(), ui::StyleType::Error)
        }
    }
}

fn summary_line(report: &BatchReport, location: &str) -> String {
    let counts = format!("{} added, {} skipped.", report.added(), report.skipped());
    if report.added() > 0 {
        format!("{counts} Table saved to {location}")
    } else if report.table.is_empty() {
        format!("{counts} No table written.")
    } else {
        format!("{counts} Table at {location} left unchanged.")
    }
}

/// Ranks each selected category in turn and prints its table.
pub async fn run(
    config: &AppConfig,
    categories: &[String],
    keep_existing: bool,
    source: &(dyn PageSource + Send + Sync),
    weights: &WeightTable,
) -> Result<()> {
    let selected = config.select_categories(categories)?;
    if selected.is_empty() {
        println!("No categories configured.");
        return Ok(());
    }

    let count = selected.len();
    for (i, category) in selected.into_iter().enumerate() {
        let store = store::open_category_store(config, category)?;
        println!(
            "\nCategory: {}",
            ui::style_text(&category.name, ui::StyleType::Title)
        );
        if !keep_existing && store.path().exists() {
            println!("Removing existing table {}", store.path().display());
        }

        let pb = ui::new_progress_bar(category.urls.len() as u64, true);
        pb.set_message(format!("Ranking {}...", category.name));
        let report = batch::run_batch(
            category,
            source,
            &store,
            weights,
            !keep_existing,
            &|outcome| {
                pb.println(describe(outcome));
                pb.inc(1);
            },
        )
        .await
        .with_context(|| format!("Ranking batch for '{}' failed", category.name))?;
        pb.finish_and_clear();

        if report.table.is_empty() {
            println!(
                "{}",
                ui::style_text("No funds could be ranked.", ui::StyleType::Subtle)
            );
        } else {
            println!("{}", ui::ranking_table(&report.table));
        }
        println!(
            "{}",
            ui::style_text(
                &summary_line(&report, &store.path().display().to_string()),
                ui::StyleType::Subtle
            )
        );
        info!(category = %category.name, rows = report.table.len(), "Category ranked");

        if i < count - 1 {
            ui::print_separator();
        }
    }

    Ok(())
}
