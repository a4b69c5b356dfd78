//! CLI interface for apiusage
//!
//! Running `apiusage` with no flags produces the default 30-day report, with
//! the admin key taken from `ANTHROPIC_ADMIN_KEY`. Every flag only adjusts
//! the [`ReportConfig`] built at startup.
//!
//! # Example
//!
//! ```bash
//! # Last 30 days, grouped by model
//! ANTHROPIC_ADMIN_KEY=sk-ant-admin-... apiusage
//!
//! # Last week as JSON
//! apiusage --days 7 --json
//! ```

use crate::config::{
    API_KEY_ENV, ApiKey, DEFAULT_BASE_URL, DEFAULT_DAYS, DEFAULT_TIMEOUT_SECS, ReportConfig,
};
use crate::error::Result;
use crate::types::GroupBy;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Summarize Anthropic API token usage and estimated cost per model
#[derive(Parser, Debug, Clone)]
#[command(name = "apiusage")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Admin API key (sk-ant-admin-...)
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Number of days to look back
    #[arg(
        long,
        short = 'd',
        env = "APIUSAGE_DAYS",
        default_value_t = DEFAULT_DAYS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub days: u32,

    /// Grouping dimension: model, api-key-id, workspace-id, service-tier, context-window
    /// (repeatable, default: model)
    #[arg(long = "group-by", short = 'g', value_name = "DIMENSION")]
    pub group_by: Vec<GroupBy>,

    /// API origin
    #[arg(long, env = "ANTHROPIC_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(
        long,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// JSON pricing table to use instead of the built-in one
    #[arg(long, value_name = "PATH")]
    pub pricing_file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show informational logs on stderr
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the parsed arguments into a validated run configuration
    pub fn to_config(&self) -> Result<ReportConfig> {
        let api_key = ApiKey::from_option(self.api_key.clone())?;
        let config = ReportConfig::new(api_key)
            .with_base_url(self.base_url.as_str())
            .with_days(self.days)
            .with_group_by(self.group_by.clone())
            .with_timeout(Duration::from_secs(self.timeout))
            .with_pricing_file(self.pricing_file.clone());
        config.validate()?;
        Ok(config)
    }
}
