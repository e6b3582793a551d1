//! Ranking table storage backends

pub mod file;
pub mod memory;
pub mod render;

use crate::core::config::{AppConfig, CategoryConfig};
use anyhow::Result;
pub use file::FileTableStore;
pub use memory::MemoryTableStore;

/// Opens the file store holding `category`'s ranking table.
pub fn open_category_store(config: &AppConfig, category: &CategoryConfig) -> Result<FileTableStore> {
    Ok(FileTableStore::new(config.output_path(category)?))
}
