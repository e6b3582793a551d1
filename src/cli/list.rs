use super::ui;
use crate::core::config::AppConfig;
use crate::core::ranking::TableStore;
use crate::store;
use anyhow::Result;
use comfy_table::{Cell, CellAlignment, Color};

/// Prints the configured categories and the state of their tables.
pub fn run(config: &AppConfig) -> Result<()> {
    if config.categories.is_empty() {
        println!("No categories configured.");
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Category"),
        ui::header_cell("URLs"),
        ui::header_cell("Table"),
        ui::header_cell("Status"),
    ]);

    for category in &config.categories {
        let store = store::open_category_store(config, category)?;
        let status = match store.load() {
            Ok(Some(ranking)) => Cell::new(format!("{} funds ranked", ranking.len())).fg(Color::Green),
            Ok(None) => Cell::new("Not ranked").fg(Color::DarkGrey),
            Err(e) => Cell::new(format!("Error: {e}")).fg(Color::Red),
        };
        table.add_row(vec![
            Cell::new(&category.name),
            Cell::new(category.urls.len()).set_alignment(CellAlignment::Right),
            Cell::new(store.path().display()),
            status,
        ]);
    }

    println!("{table}");
    Ok(())
}
