//! Run configuration
//!
//! A [`ReportConfig`] is built once at process start and handed to the
//! fetcher and the cost estimator. The admin credential is never part of the
//! source; it arrives through the environment or the command line and is
//! wrapped in [`ApiKey`] so it cannot leak through `Debug` output or logs.

use crate::error::{ApiUsageError, Result};
use crate::types::{GroupBy, ReportPeriod};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Environment variable holding the admin key
pub const API_KEY_ENV: &str = "ANTHROPIC_ADMIN_KEY";

/// Default API origin
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Default lookback window
pub const DEFAULT_DAYS: u32 = 30;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Prefix carried by Anthropic admin keys
pub const ADMIN_KEY_PREFIX: &str = "sk-ant-admin";

/// Admin API credential
///
/// `Debug` never prints the key.
///
/// # Examples
/// ```
/// use apiusage_core::config::ApiKey;
///
/// let key = ApiKey::new("sk-ant-admin01-secret").unwrap();
/// assert_eq!(key.expose(), "sk-ant-admin01-secret");
/// assert!(!format!("{key:?}").contains("secret"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key, rejecting blank input
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(ApiUsageError::MissingApiKey);
        }
        let key = Self(key);
        if !key.is_admin_key() {
            warn!(
                "API key does not start with '{}'; the usage report endpoint requires an Admin API key",
                ADMIN_KEY_PREFIX
            );
        }
        Ok(key)
    }

    /// Wrap an optional key, e.g. straight from the environment
    pub fn from_option(key: Option<String>) -> Result<Self> {
        key.map_or(Err(ApiUsageError::MissingApiKey), Self::new)
    }

    /// The raw key, for the request header only
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the key looks like an admin key
    pub fn is_admin_key(&self) -> bool {
        self.0.starts_with(ADMIN_KEY_PREFIX)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

/// Everything a report run needs, resolved up front
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Admin credential
    pub api_key: ApiKey,
    /// API origin, without the endpoint path
    pub base_url: String,
    /// Lookback window in days
    pub days: u32,
    /// Grouping dimensions sent with the request
    pub group_by: Vec<GroupBy>,
    /// Request timeout
    pub timeout: Duration,
    /// Alternative pricing table, when not using the embedded one
    pub pricing_file: Option<PathBuf>,
}

impl ReportConfig {
    /// Configuration with defaults for everything but the key
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            days: DEFAULT_DAYS,
            group_by: vec![GroupBy::Model],
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            pricing_file: None,
        }
    }

    /// Set the API origin
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the lookback window
    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    /// Set the grouping dimensions; an empty list keeps the current ones
    pub fn with_group_by(mut self, group_by: Vec<GroupBy>) -> Self {
        if !group_by.is_empty() {
            self.group_by = group_by;
        }
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a pricing table from disk
    pub fn with_pricing_file(mut self, path: Option<PathBuf>) -> Self {
        self.pricing_file = path;
        self
    }

    /// Check the values that cannot be expressed in the types
    pub fn validate(&self) -> Result<()> {
        if self.days == 0 {
            return Err(ApiUsageError::InvalidArgument(
                "the report window must cover at least one day".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(ApiUsageError::InvalidArgument(
                "the request timeout must be positive".to_string(),
            ));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ApiUsageError::Config(format!(
                "base URL must be http(s): {}",
                self.base_url
            )));
        }
        Ok(())
    }

    /// Reporting window ending today (UTC)
    pub fn period(&self) -> Result<ReportPeriod> {
        ReportPeriod::last_days(self.days)
    }
}
