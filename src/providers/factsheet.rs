use super::util::RetryPolicy;
use crate::core::config::FactsheetProviderConfig;
use crate::core::error::FetchError;
use crate::core::page::{FactsheetPage, PageSource};
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

/// Fetches factsheet pages over HTTP.
pub struct HttpPageSource {
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl HttpPageSource {
    pub fn new(config: &FactsheetProviderConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self {
            client,
            retry: RetryPolicy::from_config(config),
        })
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, url: &str) -> Result<FactsheetPage, FetchError> {
        debug!("Requesting factsheet from {}", url);
        let request_error = |e: reqwest::Error| FetchError::Request {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self
            .retry
            .run(url, || self.client.get(url).send())
            .await
            .map_err(request_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(request_error)?;
        debug!(bytes = body.len(), "Fetched factsheet from {}", url);

        Ok(FactsheetPage {
            url: url.to_string(),
            body,
        })
    }
}
