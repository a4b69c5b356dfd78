//! apiusage - Summarize Anthropic API usage and estimated cost per model
//!
//! This library provides functionality to:
//! - Fetch daily usage buckets from the Admin API usage-report endpoint
//! - Aggregate token counters per model
//! - Estimate costs from a static, reviewable pricing table
//! - Render reports as text or JSON
//!
//! # Examples
//!
//! ```no_run
//! use apiusage::{
//!     config::{ApiKey, ReportConfig},
//!     output::get_formatter,
//!     pipeline::ReportPipeline,
//! };
//!
//! #[tokio::main]
//! async fn main() -> apiusage::Result<()> {
//!     let config = ReportConfig::new(ApiKey::new("sk-ant-admin-...")?).with_days(7);
//!     let pipeline = ReportPipeline::from_config(&config)?;
//!
//!     let report = pipeline.run(config.period()?).await?;
//!     println!("{}", get_formatter(false, false).format_report(&report));
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod cli;
pub mod pipeline;

pub use apiusage_core::{aggregation, config, error, report, types};
pub use apiusage_pricing::{cost_calculator, pricing_table};
pub use apiusage_provider_anthropic::{models, usage_fetcher};
pub use apiusage_terminal::{format, messages, output};

// Re-export commonly used types
pub use error::{ApiUsageError, FetchError, Result};
pub use types::{GroupBy, ModelName, ReportPeriod, TokenCounts, UsageBucket};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
