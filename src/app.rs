//! One report run, from parsed arguments to printable output
//!
//! `main` only sets up logging and the terminal; everything that decides
//! what is printed and the exit status lives here.

use crate::cli::Cli;
use crate::config::API_KEY_ENV;
use crate::error::{ApiUsageError, Result};
use crate::messages::{format_fetch_failure, format_missing_key_help};
use crate::output::get_formatter;
use crate::pipeline::ReportPipeline;
use colored::Colorize;
use tracing::{debug, warn};

/// Exit status of a successful run
pub const EXIT_SUCCESS: u8 = 0;

/// Exit status when no report could be produced
pub const EXIT_FAILURE: u8 = 1;

/// Fetch, aggregate and price the usage, then render it
///
/// Returns the rendered report for stdout.
pub async fn run(cli: &Cli, colored: bool) -> Result<String> {
    let config = cli.to_config()?;
    debug!("Using API origin {}", config.base_url);

    let pipeline = ReportPipeline::from_config(&config)?;
    let report = pipeline
        .run(config.period()?)
        .await
        .inspect_err(|e| {
            if let ApiUsageError::Fetch(fetch_error) = e {
                warn!(status = ?fetch_error.status(), "Usage report request failed");
            }
        })?;

    Ok(get_formatter(cli.json, colored).format_report(&report))
}

/// Text printed on stderr for a failed run
pub fn error_message(error: &ApiUsageError) -> String {
    match error {
        ApiUsageError::MissingApiKey => format_missing_key_help(API_KEY_ENV),
        ApiUsageError::Fetch(fetch_error) => format!(
            "{}\n{}",
            "❌ Usage report failed".red().bold(),
            format_fetch_failure(fetch_error)
        ),
        other => format!("{} {other}\n", "Error:".red().bold()),
    }
}

/// Process exit status for the outcome of [`run`]
pub fn exit_status<T>(result: &Result<T>) -> u8 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(_) => EXIT_FAILURE,
    }
}
