//! Pipeline orchestration: one sequential cycle per trigger, single-flight.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use regionwatch_common::fingerprint_rows;
use regionwatch_store::SnapshotStore;

use crate::error::ScrapeError;
use crate::extract;
use crate::fetch::Fetcher;
use crate::freshness::{self, FreshnessDecision};

/// What a triggered cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new snapshot was persisted.
    Inserted { rows: usize, fingerprint: String },
    /// A snapshot for today already exists; nothing was fetched.
    SkippedFresh,
    /// The page was fetched but its content matches the latest stored
    /// snapshot; nothing was persisted.
    SkippedUnchanged,
}

/// Bundles the collaborators for the scrape cycle. Holds no scrape state of
/// its own; the store is the single owner of persisted snapshots.
pub struct ScrapePipeline {
    fetcher: Arc<dyn Fetcher>,
    store: Arc<dyn SnapshotStore>,
    source_url: String,
    always_refetch: bool,
    /// Single-flight guard: two racing triggers must not both insert for the
    /// same day. The loser re-evaluates freshness after acquiring the lock.
    flight: Mutex<()>,
}

impl ScrapePipeline {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        store: Arc<dyn SnapshotStore>,
        source_url: String,
        always_refetch: bool,
    ) -> Self {
        Self {
            fetcher,
            store,
            source_url,
            always_refetch,
            flight: Mutex::new(()),
        }
    }

    /// Run one freshness-gated scrape cycle:
    /// gate → fetch → extract → fingerprint → dedup → persist.
    ///
    /// Any failure aborts the cycle before anything is written; the store is
    /// never left with a partial snapshot.
    pub async fn run_cycle(&self) -> Result<CycleOutcome, ScrapeError> {
        let _flight = self.flight.lock().await;

        if freshness::check(self.store.as_ref(), self.always_refetch).await?
            == FreshnessDecision::AlreadyCurrent
        {
            info!("Already got today's results, skipping scrape");
            return Ok(CycleOutcome::SkippedFresh);
        }

        let html = self.fetcher.fetch_html(&self.source_url).await?;
        let rows = extract::extract_rows(&html)?;
        let fingerprint = fingerprint_rows(&rows);
        info!(
            rows = rows.len(),
            fingerprint = fingerprint.as_str(),
            "Extracted metrics table"
        );

        if self.store.latest_fingerprint().await?.as_deref() == Some(fingerprint.as_str()) {
            info!("Source content unchanged since latest snapshot, skipping insert");
            return Ok(CycleOutcome::SkippedUnchanged);
        }

        let snapshot = self.store.insert_snapshot(&rows, &fingerprint).await?;
        info!(
            download_id = %snapshot.download_id,
            rows = snapshot.rows.len(),
            "Inserted new snapshot"
        );
        Ok(CycleOutcome::Inserted {
            rows: snapshot.rows.len(),
            fingerprint,
        })
    }
}
