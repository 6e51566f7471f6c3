//! Cell normalization.
//!
//! Dashboard cells are messy: padded whitespace, thousands separators,
//! percent signs, and composite cells carrying two related sub-metrics
//! joined by `/` or `|` (e.g. `"120/45"`). This layer cleans and splits;
//! it never parses numbers — callers decide numeric interpretation.

/// Strip whitespace, thousands-separator commas, and percent signs.
fn clean(fragment: &str) -> String {
    fragment.trim().replace(',', "").replace('%', "")
}

/// Expand one raw cell into its cleaned scalar values.
///
/// A `/` splits the cell into exactly two values; failing that, a `|` does;
/// otherwise the cell is a single value. Each fragment is cleaned
/// independently.
pub fn normalize_cell(raw: &str) -> Vec<String> {
    let fragments: Vec<&str> = if raw.contains('/') {
        raw.splitn(2, '/').collect()
    } else if raw.contains('|') {
        raw.splitn(2, '|').collect()
    } else {
        vec![raw]
    };
    fragments.into_iter().map(clean).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_value_passes_through() {
        assert_eq!(normalize_cell("42"), vec!["42"]);
    }

    #[test]
    fn whitespace_commas_and_percents_are_stripped() {
        assert_eq!(normalize_cell(" 1,200 "), vec!["1200"]);
        assert_eq!(normalize_cell("45%"), vec!["45"]);
    }

    #[test]
    fn slash_cell_splits_into_two_cleaned_values() {
        assert_eq!(normalize_cell(" 45% /  12 "), vec!["45", "12"]);
        assert_eq!(normalize_cell("120/45"), vec!["120", "45"]);
    }

    #[test]
    fn pipe_cell_splits_into_two_cleaned_values() {
        assert_eq!(normalize_cell("6 | 7"), vec!["6", "7"]);
    }

    #[test]
    fn slash_takes_precedence_over_pipe() {
        assert_eq!(normalize_cell("1/2|3"), vec!["1", "2|3"]);
    }

    #[test]
    fn delimited_cell_always_yields_exactly_two_values() {
        for input in ["a/b", "a/b/c", "x|y", "x|y|z"] {
            assert_eq!(normalize_cell(input).len(), 2, "input: {input}");
        }
    }
}
