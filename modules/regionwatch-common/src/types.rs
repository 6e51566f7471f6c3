use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ParseError;

/// The fixed metric schema of the dashboard table, in column order.
/// All values are kept as opaque text; the source does not publish the
/// intended typing of fields like `contact-tracers` or `metrics-met`.
pub const METRIC_FIELDS: [&str; 13] = [
    "region",
    "days-decline-hospitalizations",
    "max-daily-increase-hospitalizations",
    "days-decline-deaths",
    "max-daily-increase-deaths",
    "new-hospitalizations",
    "share-total-beds-available",
    "share-icu-beds-available",
    "average-testing-capacity",
    "necessary-testing-capacity",
    "contact-tracers",
    "metrics-met",
    "metrics-met-total",
];

/// Marker stored in place of a value the source page did not provide.
/// Empty cells are dropped during extraction, so a short row cannot tell us
/// *which* column was missing; padding keeps the row well-formed anyway.
pub const UNKNOWN_VALUE: &str = "unknown";

/// One region's ordered metric values for one snapshot.
///
/// Always exactly [`METRIC_FIELDS`] long: the constructor pads short rows
/// with [`UNKNOWN_VALUE`] and rejects rows longer than the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRow(Vec<String>);

impl MetricRow {
    /// Build a validated row from extracted cell values.
    pub fn from_values(mut values: Vec<String>) -> Result<Self, ParseError> {
        if values.len() > METRIC_FIELDS.len() {
            return Err(ParseError::RowTooLong {
                len: values.len(),
                max: METRIC_FIELDS.len(),
            });
        }
        while values.len() < METRIC_FIELDS.len() {
            values.push(UNKNOWN_VALUE.to_string());
        }
        Ok(Self(values))
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    /// First column: the region identifier.
    pub fn region(&self) -> &str {
        &self.0[0]
    }
}

/// One persisted scrape: the full set of per-region rows, timestamped.
/// Insert-only; never updated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub download_id: Uuid,
    pub fetched_at: DateTime<Utc>,
    pub fingerprint: String,
    pub rows: Vec<MetricRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn full_row_is_accepted_unchanged() {
        let input = values(&[
            "NYC", "5", "10", "3", "8", "120", "45", "50", "30000", "25000", "900", "6", "7",
        ]);
        let row = MetricRow::from_values(input.clone()).unwrap();
        assert_eq!(row.values(), input.as_slice());
        assert_eq!(row.region(), "NYC");
    }

    #[test]
    fn short_row_is_padded_with_unknown() {
        let row = MetricRow::from_values(values(&["NYC", "5"])).unwrap();
        assert_eq!(row.values().len(), METRIC_FIELDS.len());
        assert_eq!(row.values()[0], "NYC");
        assert!(row.values()[2..].iter().all(|v| v == UNKNOWN_VALUE));
    }

    #[test]
    fn overlong_row_is_rejected() {
        let input = values(&[
            "NYC", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13",
        ]);
        let err = MetricRow::from_values(input).unwrap_err();
        assert!(matches!(
            err,
            crate::error::ParseError::RowTooLong { len: 14, max: 13 }
        ));
    }
}
