//! Report rendering for apiusage
//!
//! This crate provides the text and JSON report formatters, token and
//! currency formatting, and the failure/setup messages.

pub mod format;
pub mod messages;
pub mod output;

pub use output::{JsonFormatter, ReportFormatter, TextFormatter, get_formatter};
