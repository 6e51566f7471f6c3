// In-memory store for isolated pipeline tests. Same contract as SQLite.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use regionwatch_common::{MetricRow, Snapshot};

use crate::{Result, SnapshotStore};

/// Append-only `Vec` behind a mutex. Never fails.
#[derive(Default)]
pub struct MemoryStore {
    snapshots: Mutex<Vec<Snapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn insert_snapshot(&self, rows: &[MetricRow], fingerprint: &str) -> Result<Snapshot> {
        let snapshot = Snapshot {
            download_id: Uuid::new_v4(),
            fetched_at: Utc::now(),
            fingerprint: fingerprint.to_string(),
            rows: rows.to_vec(),
        };
        self.snapshots.lock().await.push(snapshot.clone());
        Ok(snapshot)
    }

    async fn latest_timestamp(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.snapshots.lock().await.last().map(|s| s.fetched_at))
    }

    async fn latest_fingerprint(&self) -> Result<Option<String>> {
        Ok(self
            .snapshots
            .lock()
            .await
            .last()
            .map(|s| s.fingerprint.clone()))
    }

    async fn all_snapshots(&self) -> Result<Vec<Snapshot>> {
        Ok(self.snapshots.lock().await.clone())
    }

    async fn clear_all(&self) -> Result<()> {
        self.snapshots.lock().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<MetricRow> {
        vec![MetricRow::from_values(vec!["NYC".to_string(), "5".to_string()]).unwrap()]
    }

    #[tokio::test]
    async fn empty_store_has_no_latest() {
        let store = MemoryStore::new();
        assert!(store.latest_timestamp().await.unwrap().is_none());
        assert!(store.latest_fingerprint().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn insert_then_query_roundtrips() {
        let store = MemoryStore::new();
        let snapshot = store.insert_snapshot(&rows(), "abc123").await.unwrap();

        assert_eq!(
            store.latest_timestamp().await.unwrap(),
            Some(snapshot.fetched_at)
        );
        assert_eq!(
            store.latest_fingerprint().await.unwrap().as_deref(),
            Some("abc123")
        );
        assert_eq!(store.all_snapshots().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn clear_all_empties_the_store() {
        let store = MemoryStore::new();
        store.insert_snapshot(&rows(), "abc123").await.unwrap();
        store.clear_all().await.unwrap();
        assert!(store.all_snapshots().await.unwrap().is_empty());
    }
}
