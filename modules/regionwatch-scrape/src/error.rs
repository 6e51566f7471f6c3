use std::time::Duration;

use thiserror::Error;

use regionwatch_common::ParseError;
use regionwatch_store::StoreError;

/// Failures while retrieving the dashboard page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Unexpected response status: {0}")]
    Status(u16),
}

/// Anything that can abort a scrape cycle. A cycle that fails leaves the
/// store untouched; rows are only written after the whole extraction
/// succeeded.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ScrapeError {
    /// Stable public category for trigger-facing callers. Detail stays in
    /// server-side logs.
    pub fn category(&self) -> &'static str {
        match self {
            ScrapeError::Fetch(_) => "fetch_failed",
            ScrapeError::Parse(_) => "parse_failed",
            ScrapeError::Store(_) => "store_failed",
        }
    }
}
