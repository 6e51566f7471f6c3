//! Content fingerprinting for change detection.
//!
//! A snapshot's fingerprint is a SHA-256 digest over its row set, hex
//! encoded. Serialization is length-framed rather than delimiter-joined so
//! that `["ab", "c"]` and `["a", "bc"]` cannot collide; it is sensitive to
//! both value order within a row and row order within the set.

use sha2::{Digest, Sha256};

use crate::types::MetricRow;

/// Digest an extracted row set. Deterministic: identical rows in identical
/// order always produce the same 64-char hex string.
pub fn fingerprint_rows(rows: &[MetricRow]) -> String {
    let mut hasher = Sha256::new();
    for row in rows {
        for value in row.values() {
            hasher.update((value.len() as u64).to_le_bytes());
            hasher.update(value.as_bytes());
        }
        // Row terminator; a zero length cannot be confused with a value frame
        // because every value frame starts with its own length.
        hasher.update(u64::MAX.to_le_bytes());
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(region: &str, n: &str) -> MetricRow {
        MetricRow::from_values(vec![region.to_string(), n.to_string()]).unwrap()
    }

    #[test]
    fn identical_row_sets_hash_identically() {
        let a = vec![row("NYC", "5"), row("LI", "3")];
        let b = vec![row("NYC", "5"), row("LI", "3")];
        assert_eq!(fingerprint_rows(&a), fingerprint_rows(&b));
    }

    #[test]
    fn reordered_rows_hash_differently() {
        let a = vec![row("NYC", "5"), row("LI", "3")];
        let b = vec![row("LI", "3"), row("NYC", "5")];
        assert_ne!(fingerprint_rows(&a), fingerprint_rows(&b));
    }

    #[test]
    fn changed_value_hashes_differently() {
        let a = vec![row("NYC", "5")];
        let b = vec![row("NYC", "6")];
        assert_ne!(fingerprint_rows(&a), fingerprint_rows(&b));
    }

    #[test]
    fn digest_is_64_hex_chars() {
        let fp = fingerprint_rows(&[row("NYC", "5")]);
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
