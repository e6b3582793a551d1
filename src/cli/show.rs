use super::ui;
use crate::core::config::AppConfig;
use crate::core::ranking::TableStore;
use crate::store;
use anyhow::{Context, Result};

/// Prints the stored ranking table of one category.
pub fn run(config: &AppConfig, category_name: &str) -> Result<()> {
    let category = config.category(category_name)?;
    let store = store::open_category_store(config, category)?;

    let table = store
        .load()
        .with_context(|| format!("Failed to load ranking table for '{category_name}'"))?;

    println!(
        "\nCategory: {}",
        ui::style_text(&category.name, ui::StyleType::Title)
    );
    match table {
        Some(table) if !table.is_empty() => {
            println!("{}", ui::ranking_table(&table));
            println!(
                "{}",
                ui::style_text(
                    &format!("{} funds from {}", table.len(), store.path().display()),
                    ui::StyleType::Subtle
                )
            );
        }
        _ => println!(
            "No ranking table yet at {}. Run `fundrank rank {}` first.",
            store.path().display(),
            category.name
        ),
    }
    Ok(())
}
