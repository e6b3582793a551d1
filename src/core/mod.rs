//! Core business logic: extraction, scoring and ranking

pub mod batch;
pub mod config;
pub mod error;
pub mod extract;
pub mod log;
pub mod metric;
pub mod page;
pub mod ranking;
pub mod score;
pub mod weights;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export main types for cleaner imports
pub use error::{ExtractionError, FetchError, StoreError};
pub use metric::{FundRecord, MetricName, MetricPair, ScoredFund};
pub use page::{FactsheetPage, PageSource};
pub use ranking::{RankingTable, TableStore, merge_and_persist};
pub use weights::WeightTable;
