//! Freshness gate: should a new scrape cycle run today?
//!
//! One snapshot per calendar day (UTC). The gate compares the latest stored
//! timestamp's date against today; `always_refetch` forces a run regardless,
//! leaving dedup to the fingerprint check further down the pipeline.

use chrono::{DateTime, NaiveDate, Utc};

use regionwatch_store::{Result, SnapshotStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreshnessDecision {
    /// No snapshot for today yet (or refetch forced) — run the cycle.
    Run,
    /// Today's snapshot already exists — skip.
    AlreadyCurrent,
}

/// Pure decision over the latest stored timestamp.
pub fn decide(
    latest: Option<DateTime<Utc>>,
    today: NaiveDate,
    always_refetch: bool,
) -> FreshnessDecision {
    if always_refetch {
        return FreshnessDecision::Run;
    }
    match latest {
        Some(ts) if ts.date_naive() == today => FreshnessDecision::AlreadyCurrent,
        _ => FreshnessDecision::Run,
    }
}

/// Query the store and decide against the current UTC date.
pub async fn check(store: &dyn SnapshotStore, always_refetch: bool) -> Result<FreshnessDecision> {
    let latest = store.latest_timestamp().await?;
    Ok(decide(latest, Utc::now().date_naive(), always_refetch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn empty_store_runs() {
        assert_eq!(decide(None, day(2026, 8, 30), false), FreshnessDecision::Run);
    }

    #[test]
    fn snapshot_from_today_skips() {
        assert_eq!(
            decide(Some(at(2026, 8, 30, 6)), day(2026, 8, 30), false),
            FreshnessDecision::AlreadyCurrent
        );
    }

    #[test]
    fn snapshot_from_yesterday_runs() {
        assert_eq!(
            decide(Some(at(2026, 8, 29, 23)), day(2026, 8, 30), false),
            FreshnessDecision::Run
        );
    }

    #[test]
    fn always_refetch_overrides_same_day_skip() {
        assert_eq!(
            decide(Some(at(2026, 8, 30, 6)), day(2026, 8, 30), true),
            FreshnessDecision::Run
        );
    }
}
