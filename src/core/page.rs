//! Factsheet page retrieval abstraction

use super::error::FetchError;
use async_trait::async_trait;
use scraper::Html;

/// Raw body of a successfully retrieved factsheet page.
#[derive(Debug, Clone)]
pub struct FactsheetPage {
    pub url: String,
    pub body: String,
}

impl FactsheetPage {
    pub fn document(&self) -> Html {
        Html::parse_document(&self.body)
    }
}

#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches one page. Anything other than an OK response is a [`FetchError`].
    async fn fetch_page(&self, url: &str) -> Result<FactsheetPage, FetchError>;
}
