//! Data models and structures for the tcping server

pub mod config;
pub mod probe;

// Re-export main model types
pub use config::Config;
pub use probe::{parse_batch, ProbeOutcome, ProbeSummary, ProbeTarget};
