// SQLite persistence. One DB row per region per snapshot, mirroring the
// dashboard table; rows of one snapshot share a download_id and fingerprint.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use tracing::info;
use uuid::Uuid;

use regionwatch_common::{MetricRow, Snapshot, METRIC_FIELDS};

use crate::{Result, SnapshotStore, StoreError};

/// Metric columns in schema order. Same fields as
/// [`METRIC_FIELDS`], snake_cased for SQL.
const METRIC_COLUMNS: [&str; 13] = [
    "region",
    "days_decline_hospitalizations",
    "max_daily_increase_hospitalizations",
    "days_decline_deaths",
    "max_daily_increase_deaths",
    "new_hospitalizations",
    "share_total_beds_available",
    "share_icu_beds_available",
    "average_testing_capacity",
    "necessary_testing_capacity",
    "contact_tracers",
    "metrics_met",
    "metrics_met_total",
];

const CREATE_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS metrics (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp TEXT NOT NULL,
        download_id TEXT NOT NULL,
        fingerprint TEXT NOT NULL,
        region TEXT NOT NULL,
        days_decline_hospitalizations TEXT NOT NULL,
        max_daily_increase_hospitalizations TEXT NOT NULL,
        days_decline_deaths TEXT NOT NULL,
        max_daily_increase_deaths TEXT NOT NULL,
        new_hospitalizations TEXT NOT NULL,
        share_total_beds_available TEXT NOT NULL,
        share_icu_beds_available TEXT NOT NULL,
        average_testing_capacity TEXT NOT NULL,
        necessary_testing_capacity TEXT NOT NULL,
        contact_tracers TEXT NOT NULL,
        metrics_met TEXT NOT NULL,
        metrics_met_total TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_metrics_timestamp ON metrics (timestamp);
"#;

const INSERT_SQL: &str = r#"
    INSERT INTO metrics
        (timestamp, download_id, fingerprint,
         region, days_decline_hospitalizations, max_daily_increase_hospitalizations,
         days_decline_deaths, max_daily_increase_deaths, new_hospitalizations,
         share_total_beds_available, share_icu_beds_available,
         average_testing_capacity, necessary_testing_capacity,
         contact_tracers, metrics_met, metrics_met_total)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
"#;

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database and ensure the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // Single connection: the pipeline is single-flow, and this keeps
        // `sqlite::memory:` databases coherent across queries.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        sqlx::raw_sql(CREATE_TABLE_SQL).execute(&pool).await?;
        info!(database_url, "Snapshot store ready");
        Ok(Self { pool })
    }
}

#[async_trait]
impl SnapshotStore for SqliteStore {
    async fn insert_snapshot(&self, rows: &[MetricRow], fingerprint: &str) -> Result<Snapshot> {
        let snapshot = Snapshot {
            download_id: Uuid::new_v4(),
            fetched_at: Utc::now(),
            fingerprint: fingerprint.to_string(),
            rows: rows.to_vec(),
        };

        let mut tx = self.pool.begin().await?;
        for row in rows {
            let mut query = sqlx::query(INSERT_SQL)
                .bind(snapshot.fetched_at)
                .bind(snapshot.download_id.to_string())
                .bind(fingerprint);
            for value in row.values() {
                query = query.bind(value);
            }
            query.execute(&mut *tx).await?;
        }
        tx.commit().await?;

        Ok(snapshot)
    }

    async fn latest_timestamp(&self) -> Result<Option<DateTime<Utc>>> {
        let ts = sqlx::query_scalar::<_, DateTime<Utc>>(
            "SELECT timestamp FROM metrics ORDER BY id DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(ts)
    }

    async fn latest_fingerprint(&self) -> Result<Option<String>> {
        let fp = sqlx::query_scalar::<_, String>(
            "SELECT fingerprint FROM metrics ORDER BY id DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(fp)
    }

    async fn all_snapshots(&self) -> Result<Vec<Snapshot>> {
        let db_rows = sqlx::query("SELECT * FROM metrics ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        // Consecutive rows sharing a download_id form one snapshot.
        let mut snapshots: Vec<Snapshot> = Vec::new();
        for db_row in db_rows {
            let download_id: String = db_row.try_get("download_id")?;
            let download_id = Uuid::parse_str(&download_id)
                .map_err(|e| StoreError::Corrupt(format!("bad download_id: {e}")))?;

            let mut values = Vec::with_capacity(METRIC_FIELDS.len());
            for column in METRIC_COLUMNS {
                values.push(db_row.try_get::<String, _>(column)?);
            }
            let row = MetricRow::from_values(values)
                .map_err(|e| StoreError::Corrupt(e.to_string()))?;

            match snapshots.last_mut() {
                Some(snapshot) if snapshot.download_id == download_id => snapshot.rows.push(row),
                _ => snapshots.push(Snapshot {
                    download_id,
                    fetched_at: db_row.try_get("timestamp")?,
                    fingerprint: db_row.try_get("fingerprint")?,
                    rows: vec![row],
                }),
            }
        }
        Ok(snapshots)
    }

    async fn clear_all(&self) -> Result<()> {
        sqlx::query("DELETE FROM metrics").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> SqliteStore {
        SqliteStore::connect("sqlite::memory:").await.unwrap()
    }

    fn row(region: &str) -> MetricRow {
        MetricRow::from_values(vec![region.to_string(), "5".to_string()]).unwrap()
    }

    #[tokio::test]
    async fn empty_store_has_no_latest() {
        let store = store().await;
        assert!(store.latest_timestamp().await.unwrap().is_none());
        assert!(store.latest_fingerprint().await.unwrap().is_none());
        assert!(store.all_snapshots().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn insert_then_query_roundtrips() {
        let store = store().await;
        let rows = vec![row("NYC"), row("LI")];
        let inserted = store.insert_snapshot(&rows, "fp-1").await.unwrap();

        // Compare at second granularity; the text round-trip may not keep
        // full sub-second precision.
        let ts = store.latest_timestamp().await.unwrap().unwrap();
        assert_eq!(ts.timestamp(), inserted.fetched_at.timestamp());
        assert_eq!(
            store.latest_fingerprint().await.unwrap().as_deref(),
            Some("fp-1")
        );

        let snapshots = store.all_snapshots().await.unwrap();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].download_id, inserted.download_id);
        assert_eq!(snapshots[0].rows, rows);
    }

    #[tokio::test]
    async fn snapshots_group_by_download_id_in_insert_order() {
        let store = store().await;
        store.insert_snapshot(&[row("NYC")], "fp-1").await.unwrap();
        store.insert_snapshot(&[row("LI")], "fp-2").await.unwrap();

        let snapshots = store.all_snapshots().await.unwrap();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].rows[0].region(), "NYC");
        assert_eq!(snapshots[1].rows[0].region(), "LI");
        assert_eq!(
            store.latest_fingerprint().await.unwrap().as_deref(),
            Some("fp-2")
        );
    }

    #[tokio::test]
    async fn clear_all_empties_the_store() {
        let store = store().await;
        store.insert_snapshot(&[row("NYC")], "fp-1").await.unwrap();
        store.clear_all().await.unwrap();
        assert!(store.all_snapshots().await.unwrap().is_empty());
    }
}
