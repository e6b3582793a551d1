//! Sequential ranking run over one category's factsheet URLs

use super::config::CategoryConfig;
use super::error::{ExtractionError, FetchError, StoreError};
use super::extract::extract;
use super::page::PageSource;
use super::ranking::{RankingTable, TableStore, merge_and_persist};
use super::score::score;
use super::weights::WeightTable;
use tracing::{debug, info, warn};

/// What happened to a single URL of the batch.
#[derive(Debug)]
pub enum FundOutcome {
    Added {
        url: String,
        name: String,
        score: f64,
        /// 1-based position in the table right after the merge.
        rank: usize,
    },
    FetchFailed {
        url: String,
        error: FetchError,
    },
    ExtractionFailed {
        url: String,
        error: ExtractionError,
    },
}

impl FundOutcome {
    pub fn url(&self) -> &str {
        match self {
            FundOutcome::Added { url, .. }
            | FundOutcome::FetchFailed { url, .. }
            | FundOutcome::ExtractionFailed { url, .. } => url,
        }
    }

    pub fn is_added(&self) -> bool {
        matches!(self, FundOutcome::Added { .. })
    }
}

#[derive(Debug)]
pub struct BatchReport {
    pub category: String,
    /// Whether a table from an earlier run was removed first.
    pub reset: bool,
    pub outcomes: Vec<FundOutcome>,
    pub table: RankingTable,
}

impl BatchReport {
    pub fn added(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_added()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.added()
    }
}

/// Runs the ranking pipeline for every URL of `category`, one at a time.
///
/// With `reset` the stored table is deleted before the first URL so the run
/// starts from an empty table. Fetch and extraction failures skip the URL;
/// a storage failure aborts the run.
pub async fn run_batch(
    category: &CategoryConfig,
    source: &(dyn PageSource + Send + Sync),
    store: &dyn TableStore,
    weights: &WeightTable,
    reset: bool,
    on_outcome: &(dyn Fn(&FundOutcome) + Sync),
) -> Result<BatchReport, StoreError> {
    info!(
        category = %category.name,
        urls = category.urls.len(),
        location = %store.location(),
        "Starting ranking batch"
    );

    let was_reset = reset && store.reset()?;
    if was_reset {
        info!(location = %store.location(), "Existing ranking table removed");
    }
    let mut table = store.load()?.unwrap_or_default();

    let mut outcomes = Vec::with_capacity(category.urls.len());
    for url in &category.urls {
        let outcome = match source.fetch_page(url).await {
            Err(error) => {
                warn!(%url, %error, "Skipping fund, page unavailable");
                FundOutcome::FetchFailed {
                    url: url.clone(),
                    error,
                }
            }
            Ok(page) => {
                let extracted = extract(&page.document(), &page.url);
                match extracted {
                    Err(error) => {
                        warn!(%url, %error, "Skipping fund, extraction failed");
                        FundOutcome::ExtractionFailed {
                            url: url.clone(),
                            error,
                        }
                    }
                    Ok(record) => {
                        let scored = score(record, weights);
                        let (name, fund_score) = (scored.record.name.clone(), scored.score);
                        debug!(%name, score = fund_score, "Fund scored");

                        table = merge_and_persist(store, scored)?;
                        let rank = table
                            .rows()
                            .iter()
                            .filter(|r| r.score >= fund_score)
                            .count();
                        FundOutcome::Added {
                            url: url.clone(),
                            name,
                            score: fund_score,
                            rank,
                        }
                    }
                }
            }
        };
        on_outcome(&outcome);
        outcomes.push(outcome);
    }

    let report = BatchReport {
        category: category.name.clone(),
        reset: was_reset,
        outcomes,
        table,
    };
    info!(
        category = %report.category,
        added = report.added(),
        skipped = report.skipped(),
        "Ranking batch finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::full_fixture;
    use crate::core::metric::{FundRecord, MetricName, ScoredFund};
    use crate::core::page::FactsheetPage;
    use crate::store::memory::MemoryTableStore;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned pages; unknown URLs answer 404.
    struct StaticPages {
        pages: HashMap<String, String>,
        requested: Mutex<Vec<String>>,
    }

    impl StaticPages {
        fn new(pages: &[(&str, String)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(url, body)| (url.to_string(), body.clone()))
                    .collect(),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PageSource for StaticPages {
        async fn fetch_page(&self, url: &str) -> Result<FactsheetPage, FetchError> {
            self.requested.lock().unwrap().push(url.to_string());
            match self.pages.get(url) {
                Some(body) => Ok(FactsheetPage {
                    url: url.to_string(),
                    body: body.clone(),
                }),
                None => Err(FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                }),
            }
        }
    }

    fn category(urls: &[&str]) -> CategoryConfig {
        CategoryConfig {
            name: "next-50".to_string(),
            output: "next_50_fund_details.html".to_string(),
            urls: urls.iter().map(|u| u.to_string()).collect(),
        }
    }

    fn page_with_sharpe(name: &str, sharpe: f64) -> String {
        let mut fixture = full_fixture(name).without_metric(MetricName::SharpeRatio);
        fixture.metrics.push((MetricName::SharpeRatio, sharpe, 1.0));
        fixture.render()
    }

    #[tokio::test]
    async fn test_batch_skips_failures_and_keeps_going() {
        let source = StaticPages::new(&[
            ("https://f/1", page_with_sharpe("Low", 0.5)),
            ("https://f/3", "<html><body>maintenance</body></html>".to_string()),
            ("https://f/4", page_with_sharpe("High", 2.0)),
        ]);
        let store = MemoryTableStore::new();
        let seen = Mutex::new(Vec::new());

        let report = run_batch(
            &category(&["https://f/1", "https://f/2", "https://f/3", "https://f/4"]),
            &source,
            &store,
            &WeightTable::default(),
            true,
            &|o| seen.lock().unwrap().push(o.url().to_string()),
        )
        .await
        .unwrap();

        assert_eq!(report.added(), 2);
        assert_eq!(report.skipped(), 2);
        assert!(matches!(report.outcomes[1], FundOutcome::FetchFailed { .. }));
        assert!(matches!(
            report.outcomes[2],
            FundOutcome::ExtractionFailed {
                error: ExtractionError::NameParse { .. },
                ..
            }
        ));
        assert!(matches!(report.outcomes[3], FundOutcome::Added { rank: 1, .. }));

        let names: Vec<&str> = report.table.rows().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["High", "Low"]);
        assert_eq!(store.load().unwrap().unwrap(), report.table);

        let order = vec!["https://f/1", "https://f/2", "https://f/3", "https://f/4"];
        assert_eq!(*source.requested.lock().unwrap(), order);
        assert_eq!(*seen.lock().unwrap(), order);
    }

    #[tokio::test]
    async fn test_reset_starts_from_empty_table() {
        let store = MemoryTableStore::new();
        let stale = ScoredFund {
            record: FundRecord::new("Stale Fund", 0.1),
            score: 99.0,
        };
        merge_and_persist(&store, stale).unwrap();

        let source = StaticPages::new(&[("https://f/1", page_with_sharpe("Fresh", 1.0))]);
        let report = run_batch(
            &category(&["https://f/1"]),
            &source,
            &store,
            &WeightTable::default(),
            true,
            &|_| {},
        )
        .await
        .unwrap();

        assert!(report.reset);
        assert_eq!(report.table.len(), 1);
        assert_eq!(report.table.rows()[0].name(), "Fresh");
    }

    #[tokio::test]
    async fn test_keep_existing_merges_into_prior_table() {
        let store = MemoryTableStore::new();
        let prior = ScoredFund {
            record: FundRecord::new("Prior Fund", 0.1),
            score: 99.0,
        };
        merge_and_persist(&store, prior).unwrap();

        let source = StaticPages::new(&[("https://f/1", page_with_sharpe("Fresh", 1.0))]);
        let report = run_batch(
            &category(&["https://f/1"]),
            &source,
            &store,
            &WeightTable::default(),
            false,
            &|_| {},
        )
        .await
        .unwrap();

        assert!(!report.reset);
        let names: Vec<&str> = report.table.rows().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Prior Fund", "Fresh"]);
        assert!(matches!(report.outcomes[0], FundOutcome::Added { rank: 2, .. }));
    }

    #[tokio::test]
    async fn test_corrupt_table_aborts_batch() {
        let store = MemoryTableStore::with_contents("<table><tr><th>Bogus</th></tr></table>");
        let source = StaticPages::new(&[("https://f/1", page_with_sharpe("Fresh", 1.0))]);

        let err = run_batch(
            &category(&["https://f/1"]),
            &source,
            &store,
            &WeightTable::default(),
            false,
            &|_| {},
        )
        .await
        .unwrap_err();

        assert!(matches!(err, StoreError::Corrupt { .. }));
        assert!(source.requested.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_no_successful_fund_leaves_empty_table() {
        let store = MemoryTableStore::new();
        let source = StaticPages::new(&[]);
        let report = run_batch(
            &category(&["https://f/1"]),
            &source,
            &store,
            &WeightTable::default(),
            true,
            &|_| {},
        )
        .await
        .unwrap();

        assert!(report.table.is_empty());
        assert!(store.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_nan_expense_ratio_never_outranks_real_funds() {
        let mut garbage = full_fixture("Garbage Fund");
        garbage.expense_ratio = Some("NaN%".to_string());
        let source = StaticPages::new(&[
            ("https://f/1", page_with_sharpe("Good", 2.0)),
            ("https://f/2", garbage.render()),
        ]);
        let store = MemoryTableStore::new();

        let report = run_batch(
            &category(&["https://f/1", "https://f/2"]),
            &source,
            &store,
            &WeightTable::default(),
            true,
            &|_| {},
        )
        .await
        .unwrap();

        assert!(matches!(
            report.outcomes[1],
            FundOutcome::ExtractionFailed {
                error: ExtractionError::ExpenseRatioInvalid { .. },
                ..
            }
        ));
        let names: Vec<&str> = report.table.rows().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Good"]);
        assert!(report.table.is_sorted());
        assert!(report.table.rows().iter().all(|r| r.score.is_finite()));
    }

    #[tokio::test]
    async fn test_padded_fund_name_survives_save_and_reload() {
        let source = StaticPages::new(&[("https://f/1", page_with_sharpe(" Padded  Fund ", 1.0))]);
        let store = MemoryTableStore::new();

        let report = run_batch(
            &category(&["https://f/1"]),
            &source,
            &store,
            &WeightTable::default(),
            true,
            &|_| {},
        )
        .await
        .unwrap();

        assert_eq!(report.table.rows()[0].name(), "Padded  Fund");
        assert_eq!(store.load().unwrap().unwrap(), report.table);
    }
}
