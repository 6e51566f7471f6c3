use thiserror::Error;

/// Failures while turning a fetched document into metric rows.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("No metrics table found in document")]
    TableNotFound,

    #[error("Row for region has {len} values, schema allows at most {max}")]
    RowTooLong { len: usize, max: usize },

    #[error("Invalid CSS selector: {0}")]
    Selector(String),
}
