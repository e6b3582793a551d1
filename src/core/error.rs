//! Error types for fetching, extraction and table storage.

use std::path::PathBuf;
use thiserror::Error;

/// A factsheet page could not be retrieved. The batch skips the URL.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to retrieve {url}: HTTP status {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to retrieve {url}: {message}")]
    Request { url: String, message: String },
}

/// A fund page lacked a required field. No record is produced for it.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Could not read fund name from {url}: {reason}")]
    NameParse { url: String, reason: String },

    #[error("Expense Ratio not found on {url}")]
    ExpenseRatioMissing { url: String },

    #[error("Invalid Expense Ratio '{value}' on {url}")]
    ExpenseRatioInvalid { url: String, value: String },
}

/// Loading or writing a ranking table failed.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Ranking table at {location} is corrupt: {reason}")]
    Corrupt { location: String, reason: String },

    #[error("Failed to render ranking table: {0}")]
    Render(#[from] minijinja::Error),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn corrupt(location: impl Into<String>, reason: impl Into<String>) -> Self {
        StoreError::Corrupt {
            location: location.into(),
            reason: reason.into(),
        }
    }
}
