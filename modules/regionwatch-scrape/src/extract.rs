//! Table extraction.
//!
//! Walks the first `<table>` of the fetched document and turns its body rows
//! into metric rows. The first body row is always a header/label row on this
//! page, whether or not the markup says so, and is skipped unconditionally.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use regionwatch_common::{MetricRow, ParseError};

use crate::normalize::normalize_cell;

fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|e| ParseError::Selector(e.to_string()))
}

/// Raw extraction: cleaned cell values per row, document order, no shape
/// validation. Empty cells are skipped entirely rather than emitted as empty
/// strings, so a row may come out shorter than the metric schema.
pub fn extract_raw_rows(html: &str) -> Result<Vec<Vec<String>>, ParseError> {
    let document = Html::parse_document(html);
    let table_sel = selector("table")?;
    let body_row_sel = selector("tbody tr")?;
    let any_row_sel = selector("tr")?;
    let cell_sel = selector("td, th")?;

    let table = document
        .select(&table_sel)
        .next()
        .ok_or(ParseError::TableNotFound)?;

    // The HTML5 parser inserts an implicit tbody for well-formed tables;
    // fall back to bare `tr` for markup where it does not.
    let mut rows: Vec<ElementRef> = table.select(&body_row_sel).collect();
    if rows.is_empty() {
        rows = table.select(&any_row_sel).collect();
    }
    debug!(total_rows = rows.len(), "Located metrics table");

    let mut extracted = Vec::new();
    for row in rows.into_iter().skip(1) {
        let mut values = Vec::new();
        for cell in row.select(&cell_sel) {
            let text: String = cell.text().collect();
            if text.trim().is_empty() {
                continue;
            }
            values.extend(normalize_cell(&text));
        }
        extracted.push(values);
    }
    Ok(extracted)
}

/// Extract and validate: every returned row is padded/checked against the
/// metric schema.
pub fn extract_rows(html: &str) -> Result<Vec<MetricRow>, ParseError> {
    extract_raw_rows(html)?
        .into_iter()
        .map(MetricRow::from_values)
        .collect()
}
