//! Ranking table and the merge pipeline over a persisted table

use super::error::StoreError;
use super::metric::ScoredFund;
use tracing::{debug, info};

/// Funds of one category ordered by descending score.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingTable {
    rows: Vec<ScoredFund>,
}

impl RankingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from rows, sorting them by score.
    pub fn from_rows(rows: Vec<ScoredFund>) -> Self {
        let mut table = Self { rows };
        table.sort();
        table
    }

    /// Appends a row and restores score order.
    pub fn insert(&mut self, fund: ScoredFund) {
        self.rows.push(fund);
        self.sort();
    }

    // `sort_by` is stable, so equal scores keep their insertion order.
    fn sort(&mut self) {
        self.rows.sort_by(|a, b| b.score.total_cmp(&a.score));
    }

    pub fn rows(&self) -> &[ScoredFund] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_sorted(&self) -> bool {
        self.rows.windows(2).all(|w| w[0].score >= w[1].score)
    }
}

/// Persistent home of one category's ranking table.
pub trait TableStore: Send + Sync {
    /// Loads the stored table, or `None` when nothing has been stored yet.
    fn load(&self) -> Result<Option<RankingTable>, StoreError>;

    /// Replaces the stored table. Readers never see a partial write.
    fn save(&self, table: &RankingTable) -> Result<(), StoreError>;

    /// Removes the stored table. Returns whether anything was removed.
    fn reset(&self) -> Result<bool, StoreError>;

    /// Human readable location, used in diagnostics.
    fn location(&self) -> String;
}

/// Loads the existing table, appends `fund`, re-sorts and writes it back.
///
/// A stored table that cannot be parsed aborts the merge; it is never
/// replaced by a fresh table.
pub fn merge_and_persist(
    store: &dyn TableStore,
    fund: ScoredFund,
) -> Result<RankingTable, StoreError> {
    let mut table = store.load()?.unwrap_or_default();
    debug!(
        location = %store.location(),
        existing = table.len(),
        fund = fund.name(),
        "Merging fund into ranking table"
    );

    table.insert(fund);
    store.save(&table)?;
    info!(location = %store.location(), rows = table.len(), "Ranking table saved");
    Ok(table)
}
