//! Core types, configuration, and aggregation for apiusage
//!
//! This crate provides the foundational types, error handling, run
//! configuration, and the per-model aggregator used by all other
//! apiusage crates.

pub mod aggregation;
pub mod config;
pub mod error;
pub mod report;
pub mod types;

// Re-export commonly used types
pub use error::{ApiUsageError, FetchError, Result};
pub use types::{GroupBy, ModelName, ReportPeriod, TokenCounts, UsageBucket};
