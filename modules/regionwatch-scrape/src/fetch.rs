use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::FetchError;

/// Retrieves raw HTML for a URL. The pipeline only needs document text or a
/// failure; swapping in a stub makes every test offline.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError>;
}

/// reqwest-backed fetcher with a bounded per-request timeout. Timeouts are
/// surfaced as their own error variant so callers can treat them as
/// transient.
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        debug!(url, "Fetching dashboard page");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.timeout)
            } else {
                FetchError::Network(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        info!(url, bytes = body.len(), "Fetched dashboard page");
        Ok(body)
    }
}
