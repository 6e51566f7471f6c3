pub mod config;
pub mod error;
pub mod fingerprint;
pub mod types;

pub use config::Config;
pub use error::ParseError;
pub use fingerprint::fingerprint_rows;
pub use types::*;
