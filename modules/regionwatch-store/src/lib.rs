//! Snapshot persistence.
//!
//! The pipeline only ever appends: one [`Snapshot`] per successful scrape
//! cycle, inserted atomically. [`SqliteStore`] is the durable implementation;
//! [`MemoryStore`] backs isolated tests with the same contract.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use regionwatch_common::{MetricRow, Snapshot};

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Corrupt stored row: {0}")]
    Corrupt(String),
}

/// Durable table of metric snapshots keyed by timestamp.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Persist one scrape's rows as a new snapshot. Atomic: either every row
    /// lands or none do.
    async fn insert_snapshot(&self, rows: &[MetricRow], fingerprint: &str) -> Result<Snapshot>;

    /// Timestamp of the most recent snapshot, if any.
    async fn latest_timestamp(&self) -> Result<Option<DateTime<Utc>>>;

    /// Fingerprint of the most recent snapshot, if any.
    async fn latest_fingerprint(&self) -> Result<Option<String>>;

    /// Every stored snapshot, oldest first.
    async fn all_snapshots(&self) -> Result<Vec<Snapshot>>;

    /// Administrative purge of all snapshots.
    async fn clear_all(&self) -> Result<()>;
}
