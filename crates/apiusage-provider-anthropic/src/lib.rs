//! Anthropic provider for apiusage
//!
//! This crate implements the usage data fetcher against the
//! Admin API usage-report endpoint and its response models.

pub mod models;
pub mod usage_fetcher;

pub use usage_fetcher::UsageFetcher;
