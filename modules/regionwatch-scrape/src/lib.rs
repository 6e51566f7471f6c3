//! The scrape-extract-normalize-dedup pipeline.
//!
//! One cycle: freshness gate → fetch → extract table rows → normalize cells
//! → fingerprint → dedup check → persist. Fetch and persist are the only
//! suspension points; extraction and normalization are pure, synchronous
//! transforms over in-memory data.

pub mod error;
pub mod extract;
pub mod fetch;
pub mod freshness;
pub mod normalize;
pub mod pipeline;

pub use error::{FetchError, ScrapeError};
pub use fetch::{Fetcher, HttpFetcher};
pub use pipeline::{CycleOutcome, ScrapePipeline};
