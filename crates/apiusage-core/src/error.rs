//! Error types for apiusage
//!
//! A run fails in one of two ways the user can act on: the admin key is
//! missing, or the usage report could not be fetched. Everything else is a
//! configuration or pricing-table problem.
//!
//! # Example
//!
//! ```
//! use apiusage_core::error::{ApiUsageError, FetchError, Result};
//!
//! fn fetch_report(authorized: bool) -> Result<()> {
//!     if !authorized {
//!         let status = FetchError::Status { status: 403, body: "forbidden".to_string() };
//!         return Err(status.into());
//!     }
//!     Ok(())
//! }
//!
//! let error = fetch_report(false).unwrap_err();
//! assert!(matches!(error, ApiUsageError::Fetch(FetchError::Status { status: 403, .. })));
//! assert_eq!(error.to_string(), "Error 403: forbidden");
//! ```

use thiserror::Error;

/// Failure to retrieve usage data from the usage-report endpoint
///
/// This is the only error a report run is expected to hit in normal
/// operation. It is surfaced to the user together with troubleshooting
/// hints and ends the run without rendering a partial report.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The endpoint answered with a non-success status
    #[error("Error {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The request never produced a response (DNS, TLS, timeout, ...)
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered 2xx but the body is not a usage report
    #[error("Malformed usage response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// HTTP status code, when the server produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) => None,
        }
    }
}

/// Main error type for apiusage operations
#[derive(Error, Debug)]
pub enum ApiUsageError {
    /// Usage data could not be fetched
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// No admin API key was supplied
    #[error("No Admin API key configured (set ANTHROPIC_ADMIN_KEY)")]
    MissingApiKey,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Pricing table could not be built
    #[error("Invalid pricing table: {0}")]
    Pricing(String),
}

/// Convenience type alias for Results in apiusage
///
/// # Example
///
/// ```
/// use apiusage_core::Result;
///
/// fn process_data() -> Result<String> {
///     Ok("Processed successfully".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, ApiUsageError>;
