use super::render::{parse_table, render_table};
use crate::core::error::StoreError;
use crate::core::ranking::{RankingTable, TableStore};
use chrono::Utc;
use std::sync::RwLock;
use tracing::debug;

/// In-memory table store. Keeps the rendered document rather than the table
/// so every load goes through the same parser as the file store.
#[derive(Default)]
pub struct MemoryTableStore {
    contents: RwLock<Option<String>>,
}

impl MemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an already rendered document.
    pub fn with_contents(html: impl Into<String>) -> Self {
        Self {
            contents: RwLock::new(Some(html.into())),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl TableStore for MemoryTableStore {
    fn load(&self) -> Result<Option<RankingTable>, StoreError> {
        match self.contents() {
            Some(html) => parse_table(&html, &self.location()).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, table: &RankingTable) -> Result<(), StoreError> {
        let html = render_table(table, Utc::now())?;
        let mut contents = self
            .contents
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *contents = Some(html);
        debug!(rows = table.len(), "Memory table saved");
        Ok(())
    }

    fn reset(&self) -> Result<bool, StoreError> {
        let mut contents = self
            .contents
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(contents.take().is_some())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
